/*!
 * Work Plans
 * How much work a worker has and how it ends
 */

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// What a worker does once its burst reaches zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Finish {
    /// Terminate directly
    Exit,
    /// Request I/O, then terminate on the first run after waking
    IoThenExit,
}

/// Work assigned to one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPlan {
    /// Units of work to consume
    pub burst: u32,
    pub finish: Finish,
}

impl WorkPlan {
    /// Consume `burst` units, then terminate
    pub const fn exit_after(burst: u32) -> Self {
        Self {
            burst,
            finish: Finish::Exit,
        }
    }

    /// Consume `burst` units, then request I/O
    pub const fn io_after(burst: u32) -> Self {
        Self {
            burst,
            finish: Finish::IoThenExit,
        }
    }

    /// Draw a burst from `bursts` and an I/O ending with `io_probability`
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        bursts: &RangeInclusive<u32>,
        io_probability: f64,
    ) -> Self {
        let burst = if bursts.start() >= bursts.end() {
            *bursts.start()
        } else {
            rng.gen_range(bursts.clone())
        };
        let finish = if rng.gen_bool(io_probability.clamp(0.0, 1.0)) {
            Finish::IoThenExit
        } else {
            Finish::Exit
        };
        Self { burst, finish }
    }
}
