/// TypeScript Bindings Generator
///
/// The TypeScript bindings (src/bindings.ts) are exported at runtime by
/// tauri-specta when the app starts in debug mode. Launching the full app
/// just to refresh them means opening the GUI and answering the microphone
/// prompt, so this test exports them directly instead.
///
/// ## Usage:
/// ```bash
/// cargo test --test generate_bindings
/// ```
#[test]
fn generate_bindings() {
    let out = std::env::temp_dir().join("candela_bindings.ts");
    candela_lib::specta::export_typescript(&out).expect("bindings export should succeed");

    let bindings = std::fs::read_to_string(&out).expect("bindings file should exist");
    for name in ["loadProgress", "enterCake", "submitGiftAnswer"] {
        assert!(bindings.contains(name), "missing binding for {}", name);
    }
}
