//! Encoding and decoding of Newton instructions, the 16 bit words a Prism LED controller
//! receives, together with their textual assembly form.
//!
//! ```
//! use newton::{decode_instruction, encode_instruction, InstructionKind, OptionPayload, TimeOptions};
//!
//! let sleep = decode_instruction(0b000111_10_00001010).unwrap();
//! assert_eq!(sleep.kind, InstructionKind::Sleep);
//! assert_eq!(sleep.options, OptionPayload::Time(TimeOptions::Sec));
//! assert_eq!(sleep.value, 10);
//! assert_eq!(sleep.to_string(), "SLP SEC 0A");
//! assert_eq!(encode_instruction(sleep).unwrap(), 0b000111_10_00001010);
//! ```

#[macro_use] extern crate lazy_static;

pub mod bytecode;
pub mod error;

pub use bytecode::*;
pub use error::{NewtonError, Result};
