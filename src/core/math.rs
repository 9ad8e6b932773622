// Math utilities and tick/second unit conversions

/// Fixed simulation rate. One tick is one physics step.
pub const TICKS_PER_SECOND: f32 = 60.0;

/// Length of one tick in milliseconds
pub const TICK_MILLIS: f32 = 1000.0 / TICKS_PER_SECOND;

/// Convert a per-tick rate (e.g. a velocity) into a per-second rate
pub fn per_tick_to_per_second(value: f32) -> f32 {
    value * TICKS_PER_SECOND
}

/// Convert a per-second rate back into a per-tick rate
pub fn per_second_to_per_tick(value: f32) -> f32 {
    value / TICKS_PER_SECOND
}

/// Convert a per-tick² acceleration into a per-second² acceleration
pub fn per_tick_sq_to_per_second_sq(value: f32) -> f32 {
    value * TICKS_PER_SECOND * TICKS_PER_SECOND
}

/// Check if two f32 values are approximately equal
#[allow(dead_code)]
pub fn approx_equal(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}
