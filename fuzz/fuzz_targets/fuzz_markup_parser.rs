#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(xml) = std::str::from_utf8(data) else {
        return;
    };

    // A tree that parses must parse again from its canonical form
    if let Ok(tree) = geoquadtree::parse_document(xml) {
        let again = geoquadtree::parse_document(&tree.to_markup())
            .expect("canonical markup must parse");
        assert!(tree.same_structure(&again));
    }
});
