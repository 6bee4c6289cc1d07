//! Placement Policy Tests.

use dcpu16_linker::{LinkError, Linker, LinkerConfig, ObjectUnit, PlacementPolicy};
use rstest::rstest;

use crate::common::{caller, filler, looper};

fn linker(placement: PlacementPolicy, address_space: usize) -> Linker {
    Linker::new(LinkerConfig {
        placement,
        address_space,
    })
}

fn offsets(linker: &Linker, units: &[ObjectUnit]) -> Vec<(usize, usize)> {
    linker
        .link(units)
        .unwrap()
        .placements()
        .iter()
        .map(|p| (p.unit, p.offset))
        .collect()
}

#[test]
fn sequential_follows_input_order() {
    let units = [filler(1, 3), filler(2, 5), filler(3, 1)];
    let linker = linker(PlacementPolicy::Sequential, 0x10000);
    assert_eq!(offsets(&linker, &units), [(0, 0), (1, 3), (2, 8)]);
}

#[test]
fn priority_places_higher_first_and_keeps_ties_in_input_order() {
    let units = [
        filler(1, 2).with_priority(0),
        filler(2, 2).with_priority(5),
        filler(3, 2).with_priority(0),
        filler(4, 2).with_priority(5),
    ];
    let linker = linker(PlacementPolicy::Priority, 0x10000);
    assert_eq!(offsets(&linker, &units), [(1, 0), (3, 2), (0, 4), (2, 6)]);
    assert_eq!(
        linker.link(&units).unwrap().words(),
        [2, 2, 4, 4, 1, 1, 3, 3]
    );
}

#[test]
fn priority_placement_relocates_against_final_offsets() {
    let units = [caller(), looper().with_priority(1)];
    let image = linker(PlacementPolicy::Priority, 0x10000)
        .link(&units)
        .unwrap();
    // The looper now sits at 0 and the caller at 2.
    assert_eq!(image.words(), [0x7f81, 0x0000, 0x7c01, 0x0005, 0x7f81, 0x0000]);
    assert_eq!(image.symbol("start"), Some(0));
}

#[rstest]
#[case::exact_fit(&[100, 28], 128, true)]
#[case::one_over(&[100, 29], 128, false)]
#[case::full_memory(&[0x8000, 0x8000], 0x10000, true)]
#[case::clamped(&[0x10000, 1], usize::MAX, false)]
fn address_space_limit(#[case] lens: &[usize], #[case] space: usize, #[case] fits: bool) {
    let units: Vec<_> = lens.iter().map(|&len| filler(0, len)).collect();
    let result = linker(PlacementPolicy::Sequential, space).link(&units);
    if fits {
        assert_eq!(result.map(|image| image.len()), Ok(lens.iter().sum()));
    } else {
        assert_eq!(
            result,
            Err(LinkError::AddressSpaceOverflow {
                required: lens.iter().sum(),
                available: space.min(0x10000)
            })
        );
    }
}
