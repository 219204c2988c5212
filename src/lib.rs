//! # Line-numbered BASIC
//!
//! A tree-walking interpreter for BASIC programs in the classic
//! line-numbered style.
//!
//! Source text is lexed and parsed one line at a time by [`lang`].
//! The parsed [`mach::Program`] runs inside a [`mach::Runtime`] session
//! which reports output, input requests and termination as events.
//!
//! ```
//! use basic::mach::{Config, Event, Runtime, Termination};
//!
//! let source = "10 LET X = 3\n20 LET Y = 4\n30 PRINT X + Y\n40 END\n";
//! let mut runtime = Runtime::load(source, Config::default()).unwrap();
//! assert_eq!(runtime.execute(100), Event::Print("7\n".to_string()));
//! assert_eq!(runtime.execute(100), Event::Stopped(Termination::End));
//! ```

pub mod lang;
pub mod mach;
