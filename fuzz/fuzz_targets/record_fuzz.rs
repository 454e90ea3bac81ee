//! Record parser fuzz target: feed arbitrary text to the dump parser.
//! The parser must not panic; it should return Ok(entries) or Err(AuditError).
//! Build with: cargo fuzz run record_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    if let Ok(entries) = ttcrc::parse_dump(s) {
        let table = ttcrc::GroupTable::build(entries);
        let _ = ttcrc::audit(&table);
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run record_fuzz");
}
