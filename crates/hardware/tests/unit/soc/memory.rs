//! Main Memory Tests.

use dcpu16_hardware::CpuError;
use dcpu16_hardware::common::MEMORY_WORDS;
use dcpu16_hardware::soc::Memory;

#[test]
fn every_word_is_addressable() {
    let mut memory = Memory::new();
    assert_eq!(memory.len(), MEMORY_WORDS);
    memory.write(0xffff, 0x1234);
    memory.write(0, 0x5678);
    assert_eq!(memory.read(0xffff), 0x1234);
    assert_eq!(memory.read(0), 0x5678);
}

#[test]
fn load_writes_prefix_only() {
    let mut memory = Memory::new();
    memory.write(3, 9);
    memory.load(&[1, 2]).unwrap();
    assert_eq!(&memory.as_slice()[..4], &[1, 2, 0, 9]);
}

#[test]
fn load_rejects_oversized_image() {
    let mut memory = Memory::new();
    let image = vec![1; MEMORY_WORDS + 1];
    assert_eq!(
        memory.load(&image),
        Err(CpuError::ImageTooLarge {
            len: MEMORY_WORDS + 1,
            capacity: MEMORY_WORDS
        })
    );
    assert!(memory.as_slice().iter().all(|&w| w == 0));
}

#[test]
fn clear_zeroes_everything() {
    let mut memory = Memory::new();
    memory.load(&[5; 16]).unwrap();
    memory.clear();
    assert_eq!(memory, Memory::default());
}

#[test]
fn debug_reports_used_prefix() {
    let mut memory = Memory::new();
    memory.write(9, 1);
    let text = format!("{memory:?}");
    assert!(text.contains("used_prefix: 10"), "{text}");
}
