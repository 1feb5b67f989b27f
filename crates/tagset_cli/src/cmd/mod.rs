/// Sample catalog load, report, and save command.
pub mod demo;
/// Settings document inspection command.
pub mod inspect;
/// Tagged tree rendering.
pub mod print;
/// Sample catalog declarations shared by commands.
pub mod sample;
/// Single-value update command.
pub mod set;
/// Shared CLI helpers.
pub mod util;
