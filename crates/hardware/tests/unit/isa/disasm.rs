//! Disassembler Tests.

use dcpu16_hardware::isa::disasm::disassemble;
use rstest::rstest;

#[rstest]
#[case::next_word(&[0x7c01, 0x0030], "SET A, 0x0030")]
#[case::registers(&[0x0402], "ADD A, B")]
#[case::indirect_both(&[0x7fc1, 0x0001, 0xdead], "SET [0xdead], 0x0001")]
#[case::offset(&[0xa201, 0x0002], "SET [A + 0x0002], 7")]
#[case::pick(&[0x6861, 0x0001], "SET X, PICK 0x0001")]
#[case::push(&[0x0301], "SET PUSH, A")]
#[case::pop(&[0x6381], "SET PC, POP")]
#[case::minus_one(&[0x8012], "IFE A, -1")]
#[case::special(&[0x7c20, 0x0010], "JSR 0x0010")]
#[case::hardware(&[0x8640], "HWI 0")]
#[case::missing_word(&[0x7c01], "SET A, ?")]
#[case::reserved(&[0x0018], "DAT 0x0018")]
fn renders(#[case] words: &[u16], #[case] text: &str) {
    assert_eq!(disassemble(words), text);
}

#[test]
fn empty_input_renders_nothing() {
    assert_eq!(disassemble(&[]), "");
}
