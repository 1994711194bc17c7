use crate::application::ports::time::Clock;
use chrono::{DateTime, Utc};

/// Wall clock used outside of tests.
#[derive(Debug, Default, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
