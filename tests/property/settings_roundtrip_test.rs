//! Property-based tests for CopyMeSettings serialization round-trip.
//!
//! These tests verify that CopyMeSettings can be serialized to JSON
//! and deserialized back without data loss for arbitrary valid inputs.

use copyme::types::settings::{
    ClipboardBackend, ClipboardSettings, CopyMeSettings, NotificationSettings, StorageBackend,
    StorageSettings,
};
use proptest::prelude::*;

// --- Arbitrary strategies for all settings sub-types ---

fn arb_storage_settings() -> impl Strategy<Value = StorageSettings> {
    (
        "[a-zA-Z][a-zA-Z0-9_]{0,30}",
        prop_oneof![Just(StorageBackend::Sqlite), Just(StorageBackend::Memory)],
        proptest::option::of("/[a-z0-9/_.-]{1,40}"),
    )
        .prop_map(|(key, backend, database_path)| StorageSettings {
            key,
            backend,
            database_path,
        })
}

fn arb_notification_settings() -> impl Strategy<Value = NotificationSettings> {
    (0u64..600_000, ".{0,40}").prop_map(|(duration_ms, default_message)| NotificationSettings {
        duration_ms,
        default_message,
    })
}

fn arb_clipboard_settings() -> impl Strategy<Value = ClipboardSettings> {
    (
        prop_oneof![Just(ClipboardBackend::System), Just(ClipboardBackend::Memory)],
        "[\\n -~]{0,12}",
        0usize..500,
    )
        .prop_map(|(backend, copy_all_separator, preview_chars)| ClipboardSettings {
            backend,
            copy_all_separator,
            preview_chars,
        })
}

fn arb_settings() -> impl Strategy<Value = CopyMeSettings> {
    (
        arb_storage_settings(),
        arb_notification_settings(),
        arb_clipboard_settings(),
    )
        .prop_map(|(storage, notification, clipboard)| CopyMeSettings {
            storage,
            notification,
            clipboard,
        })
}

// **Settings round trip**
//
// *For any* valid CopyMeSettings, serializing to JSON and deserializing back
// SHALL produce an equal value.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn settings_json_roundtrip(settings in arb_settings()) {
        let json = serde_json::to_string(&settings).unwrap();
        let back: CopyMeSettings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, settings);
    }

    #[test]
    fn settings_pretty_json_roundtrip(settings in arb_settings()) {
        let json = serde_json::to_string_pretty(&settings).unwrap();
        let back: CopyMeSettings = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, settings);
    }
}
