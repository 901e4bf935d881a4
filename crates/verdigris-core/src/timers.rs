/// Per-tick animation timer bank.
///
/// Four independent countdown/decay values advanced once per movement tick.
/// None of these are persisted: on reload they start at rest, since they
/// represent transient animation state rather than durable condition.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TimerBank {
    button_ticks: f32,
    bend_over_ticks: f32,
    head_spin_ticks: i32,
    rod_wiggle_ticks: f32,
    spin_progress: f32,
}

impl TimerBank {
    /// Advance all timers by one movement tick.
    pub fn tick(&mut self) {
        self.tick_button_and_bend();
        self.tick_head_spin();
    }

    /// Button countdown, then bend-over recovery.
    ///
    /// The bend-over value only decays toward 0 while no button-press
    /// animation is playing; the check runs the same tick the button timer
    /// lands on 0, so recovery starts without a dead tick.
    fn tick_button_and_bend(&mut self) {
        if self.button_ticks > 0.0 {
            self.button_ticks = (self.button_ticks - 1.0).max(0.0);
        }
        if self.button_ticks == 0.0 {
            if self.bend_over_ticks > 0.0 {
                self.bend_over_ticks -= 1.0;
            } else if self.bend_over_ticks < 0.0 {
                self.bend_over_ticks += 1.0;
            }
        }
    }

    /// Head spin decays at double speed, flooring at 0. The derived easing
    /// value is only refreshed while the timer is still running; once it
    /// expires, `spin_progress` holds its last computed value and is
    /// meaningful to callers only while `head_spin_ticks > 0`.
    fn tick_head_spin(&mut self) {
        if self.head_spin_ticks <= 0 {
            return;
        }
        self.head_spin_ticks = (self.head_spin_ticks - 2).max(0);
        if self.head_spin_ticks > 0 {
            self.spin_progress = self.head_spin_ticks as f32 * 0.01 - 0.05;
        }
    }

    #[inline]
    pub fn button_ticks(&self) -> f32 {
        self.button_ticks
    }

    pub fn set_button_ticks(&mut self, ticks: f32) {
        self.button_ticks = ticks.max(0.0);
    }

    #[inline]
    pub fn bend_over_ticks(&self) -> f32 {
        self.bend_over_ticks
    }

    pub fn set_bend_over_ticks(&mut self, ticks: f32) {
        self.bend_over_ticks = ticks;
    }

    #[inline]
    pub fn head_spin_ticks(&self) -> i32 {
        self.head_spin_ticks
    }

    pub fn set_head_spin_ticks(&mut self, ticks: i32) {
        self.head_spin_ticks = ticks.max(0);
    }

    #[inline]
    pub fn spin_progress(&self) -> f32 {
        self.spin_progress
    }

    #[inline]
    pub fn rod_wiggle_ticks(&self) -> f32 {
        self.rod_wiggle_ticks
    }

    /// Decay of the rod-wiggle timer is owned by the external goal driving
    /// it; the bank only stores the value.
    pub fn set_rod_wiggle_ticks(&mut self, ticks: f32) {
        self.rod_wiggle_ticks = ticks;
    }
}
