//! Configuration section definitions.
//!
//! Each module corresponds to a section in `nobg.toml`:
//!
//! | Module  | TOML Section | Purpose                          |
//! |---------|--------------|----------------------------------|
//! | `strip` | `[strip]`    | SVG background detection         |
//! | `fetch` | `[fetch]`    | HTTP download                    |

mod fetch;
mod strip;

pub use fetch::FetchConfig;
pub use strip::StripConfig;
