use std::time::Duration;

/// Frame clock handed into every update pass. `total` is the monotonic
/// scheduler clock that phase deadlines are compared against.
#[derive(Clone, Copy, Debug)]
pub struct Time {
    pub elapsed: Duration,
    pub total: Duration,
}
