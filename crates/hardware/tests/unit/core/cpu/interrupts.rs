//! Interrupt Tests.
//!
//! Covers handler entry and `RFI`, discarding with `IA == 0`, `IAQ` holding,
//! software interrupts, `IAG`, and the queue overflow policies.

use dcpu16_hardware::config::{Config, OverflowPolicy};
use dcpu16_hardware::{Cpu, CpuError, Register, RunState};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::builder::instruction::{op, sp, val};
use crate::common::{Program, TestContext, basic, lit, special};

const HANDLER: u16 = 0x10;

fn config_with_queue(capacity: usize, policy: OverflowPolicy) -> Config {
    let mut config = Config::default();
    config.interrupts.queue_capacity = capacity;
    config.interrupts.overflow_policy = policy;
    config
}

/// `IAS HANDLER ; SET B, 1 ; loop: SET PC, 3` with a handler that copies
/// the message into `C` and returns.
fn handler_program() -> Vec<u16> {
    Program::new()
        .special(sp::IAS, val::NEXT, &[HANDLER])
        .basic(op::SET, val::B, lit(1), &[])
        .basic(op::SET, val::PC, lit(3), &[])
        .org(HANDLER as usize)
        .basic(op::SET, val::C, val::A, &[])
        .special(sp::RFI, lit(0), &[])
        .build()
}

#[test]
fn message_is_discarded_without_handler() {
    let program = [basic(op::SET, val::A, lit(1)), basic(op::SET, val::A, lit(2))];
    let mut ctx = TestContext::new().load(&program);
    ctx.cpu.queue_interrupt(5).unwrap();

    ctx.step();

    assert_eq!(ctx.reg(Register::A), 1);
    assert_eq!(ctx.cpu.regs.sp, 0);
    assert!(ctx.cpu.pending_interrupts().is_empty());
    assert_eq!(ctx.cpu.stats().interrupts_discarded, 1);
    assert_eq!(ctx.cpu.stats().interrupts_serviced, 0);
}

#[test]
fn handler_entry_and_return() {
    let mut ctx = TestContext::new().load(&handler_program());
    ctx.step();
    assert_eq!(ctx.cpu.regs.ia, HANDLER);

    ctx.set_reg(Register::A, 0x1234);
    ctx.cpu.queue_interrupt(0x77).unwrap();

    // Entry happens before the instruction, so this step runs `SET C, A`.
    ctx.step();
    assert_eq!(ctx.reg(Register::C), 0x77);
    assert_eq!(ctx.reg(Register::A), 0x77);
    assert_eq!(ctx.cpu.regs.pc, HANDLER + 1);
    assert_eq!(ctx.cpu.regs.sp, 0xfffe);
    assert_eq!(ctx.mem(0xffff), 2);
    assert_eq!(ctx.mem(0xfffe), 0x1234);
    assert!(ctx.cpu.interrupt_queueing());

    assert_eq!(ctx.step(), 3);
    assert_eq!(ctx.reg(Register::A), 0x1234);
    assert_eq!(ctx.cpu.regs.pc, 2);
    assert_eq!(ctx.cpu.regs.sp, 0);
    assert!(!ctx.cpu.interrupt_queueing());

    ctx.step();
    assert_eq!(ctx.reg(Register::B), 1);
    assert_eq!(ctx.cpu.stats().interrupts_serviced, 1);
}

#[test]
fn one_interrupt_per_step_and_none_inside_handler() {
    let mut ctx = TestContext::new().load(&handler_program());
    ctx.step();
    ctx.cpu.queue_interrupt(1).unwrap();
    ctx.cpu.queue_interrupt(2).unwrap();

    ctx.step();
    assert_eq!(ctx.reg(Register::C), 1);
    assert_eq!(ctx.cpu.pending_interrupts(), vec![2]);

    // RFI runs with queueing still on, so the second message waits.
    ctx.step();
    assert_eq!(ctx.cpu.pending_interrupts(), vec![2]);
    assert_eq!(ctx.cpu.regs.pc, 2);

    ctx.step();
    assert_eq!(ctx.reg(Register::C), 2);
    assert!(ctx.cpu.pending_interrupts().is_empty());
    assert_eq!(ctx.cpu.stats().interrupts_serviced, 2);
}

#[test]
fn iaq_holds_interrupts_until_cleared() {
    let program = Program::new()
        .special(sp::IAS, val::NEXT, &[HANDLER])
        .special(sp::IAQ, lit(1), &[])
        .basic(op::SET, val::B, lit(1), &[])
        .special(sp::IAQ, lit(0), &[])
        .basic(op::SET, val::C, lit(2), &[])
        .org(HANDLER as usize)
        .basic(op::SET, val::X, val::A, &[])
        .build();
    let mut ctx = TestContext::new().load(&program);
    ctx.run_steps(2);
    assert!(ctx.cpu.interrupt_queueing());

    ctx.cpu.queue_interrupt(0x42).unwrap();
    ctx.run_steps(2);
    assert_eq!(ctx.reg(Register::B), 1);
    assert_eq!(ctx.cpu.pending_interrupts(), vec![0x42]);
    assert!(!ctx.cpu.interrupt_queueing());

    ctx.step();
    assert_eq!(ctx.reg(Register::X), 0x42);
    assert_eq!(ctx.reg(Register::C), 0);
    assert_eq!(ctx.mem(0xffff), 5);
}

#[test]
fn int_queues_a_software_interrupt() {
    let program = Program::new()
        .special(sp::IAS, val::NEXT, &[HANDLER])
        .special(sp::INT, lit(3), &[])
        .basic(op::SET, val::B, lit(1), &[])
        .org(HANDLER as usize)
        .basic(op::SET, val::C, val::A, &[])
        .build();
    let mut ctx = TestContext::new().load(&program);
    ctx.step();
    assert_eq!(ctx.step(), 4);
    assert_eq!(ctx.cpu.pending_interrupts(), vec![3]);

    ctx.step();
    assert_eq!(ctx.reg(Register::C), 3);
    assert_eq!(ctx.reg(Register::B), 0);
}

#[test]
fn iag_reads_interrupt_address() {
    let program = Program::new()
        .special(sp::IAS, val::NEXT, &[0x0abc])
        .special(sp::IAG, val::A, &[])
        .build();
    let mut ctx = TestContext::new().load(&program);
    ctx.run_steps(2);
    assert_eq!(ctx.reg(Register::A), 0x0abc);
}

#[rstest]
#[case::drop_newest(OverflowPolicy::DropNewest, Ok(()), vec![1, 2], 1)]
#[case::drop_oldest(OverflowPolicy::DropOldest, Ok(()), vec![2, 3], 1)]
#[case::fail(
    OverflowPolicy::Fail,
    Err(CpuError::InterruptQueueFull { message: 3, capacity: 2 }),
    vec![1, 2],
    0
)]
fn overflow_policies(
    #[case] policy: OverflowPolicy,
    #[case] third: Result<(), CpuError>,
    #[case] pending: Vec<u16>,
    #[case] dropped: u64,
) {
    let mut cpu = Cpu::new(&config_with_queue(2, policy));
    cpu.queue_interrupt(1).unwrap();
    cpu.queue_interrupt(2).unwrap();
    assert_eq!(cpu.queue_interrupt(3), third);
    assert_eq!(cpu.pending_interrupts(), pending);
    assert_eq!(cpu.stats().interrupts_dropped, dropped);
}

#[test]
fn rejected_int_completes_the_instruction() {
    let program = [
        special(sp::IAQ, lit(1)),
        special(sp::INT, lit(1)),
        special(sp::INT, lit(2)),
        basic(op::SET, val::A, lit(1)),
    ];
    let mut cpu = Cpu::new(&config_with_queue(1, OverflowPolicy::Fail));
    cpu.flash(&program).unwrap();
    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.step(), Ok(4));
    assert_eq!(
        cpu.step(),
        Err(CpuError::InterruptQueueFull {
            message: 2,
            capacity: 1
        })
    );
    assert_eq!(cpu.state(), RunState::Ready);
    assert_eq!(cpu.regs.pc, 3);
    assert_eq!(cpu.cycles(), 10);
    assert_eq!(cpu.step(), Ok(1));
    assert_eq!(cpu.regs.read(Register::A), 1);
}

#[test]
fn interrupts_can_be_queued_before_flash() {
    let mut cpu = Cpu::default();
    cpu.queue_interrupt(9).unwrap();
    assert_eq!(cpu.pending_interrupts(), vec![9]);
    assert_eq!(cpu.state(), RunState::Idle);
}
