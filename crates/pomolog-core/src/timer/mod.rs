mod countdown;
mod driver;

pub use countdown::{CountdownState, CountdownTimer, Tick, TickObserver, TimeComponents};
pub use driver::CountdownDriver;
