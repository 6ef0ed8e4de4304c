#![no_main]

use geoquadtree::Direction;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&code, digits)) = data.split_last() else {
        return;
    };
    let Ok(digits) = std::str::from_utf8(digits) else {
        return;
    };
    let code = char::from(code).to_string();

    if let Ok(moved) = geoquadtree::navigate_str(digits, &code) {
        let direction: Direction = code.parse().expect("code was accepted once");
        if direction.is_pan() {
            assert_eq!(moved.depth(), digits.len());
            assert_eq!(moved.navigate(direction.opposite()).to_string(), digits);
        }
    }
});
