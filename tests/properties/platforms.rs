//! Property tests for platform-specific release partitioning.

use proptest::prelude::*;

use pkgfile_frontend::application::ManifestAssembler;
use pkgfile_frontend::domain::entities::{FileInventory, FileRecord, SessionState};
use pkgfile_frontend::domain::value_objects::{PageNames, Platform};

use crate::common::RecordingBuilder;

fn platform() -> impl Strategy<Value = Platform> {
    prop_oneof![Just(Platform::None), Just(Platform::Windows), Just(Platform::Unix)]
}

fn session(platforms: &[Platform]) -> SessionState<RecordingBuilder> {
    let mut inventory = FileInventory::new();
    for (idx, platform) in platforms.iter().enumerate() {
        inventory.push(
            format!("./bin/tool{}.sh", idx),
            FileRecord::default().with_platform(*platform),
        );
    }
    let mut state = SessionState::new();
    state.set_files(inventory);
    state
}

fn count(platforms: &[Platform], wanted: Platform) -> usize {
    platforms.iter().filter(|p| **p == wanted).count()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Every platform-bound file is excluded from exactly one
    /// release; a second release only exists when both platforms occur.
    #[test]
    fn property_platform_files_partition_releases(
        platforms in proptest::collection::vec(platform(), 0..12)
    ) {
        let state = session(&platforms);
        let pages = PageNames::new();
        let mut builder = RecordingBuilder::new();

        let report = ManifestAssembler::new(&state, &pages).prepare(&mut builder);

        let windows = count(&platforms, Platform::Windows);
        let unix = count(&platforms, Platform::Unix);
        let bound = windows + unix;

        prop_assert_eq!(builder.calls_to("release-ignore").len(), bound);
        prop_assert_eq!(builder.calls_to("os").len(), usize::from(windows > 0));
        let expected_releases = if windows > 0 && unix > 0 { 2 } else { 1 };
        prop_assert_eq!(builder.calls_to("release").len(), expected_releases);
        prop_assert_eq!(report.releases, expected_releases);
    }

    /// PROPERTY: Windows exclusions are recorded before the second release is
    /// opened, unix exclusions after it.
    #[test]
    fn property_windows_release_comes_first(
        platforms in proptest::collection::vec(platform(), 1..12)
    ) {
        let state = session(&platforms);
        let pages = PageNames::new();
        let mut builder = RecordingBuilder::new();
        ManifestAssembler::new(&state, &pages).prepare(&mut builder);

        let release_calls: Vec<usize> = builder
            .calls
            .iter()
            .enumerate()
            .filter(|(_, call)| call.as_str() == "release")
            .map(|(idx, _)| idx)
            .collect();
        let second = release_calls.get(1).copied();

        for (idx, platform) in platforms.iter().enumerate() {
            let call = format!("release-ignore bin/tool{}.sh", idx);
            let position = builder.calls.iter().position(|c| *c == call);
            match platform {
                Platform::None => prop_assert!(position.is_none()),
                Platform::Windows => {
                    let position = position.unwrap();
                    prop_assert!(second.map_or(true, |s| position < s));
                }
                Platform::Unix => {
                    let position = position.unwrap();
                    prop_assert!(second.map_or(true, |s| position > s));
                }
            }
        }
    }
}
