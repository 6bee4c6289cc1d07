//! Hardware Dispatch Tests.
//!
//! Exercises `HWN`, `HWQ` and `HWI` against mock devices, per-cycle device
//! callbacks, device-raised interrupts and the attach/detach rules.

use dcpu16_hardware::config::{Config, OverflowPolicy};
use dcpu16_hardware::soc::devices::Clock;
use dcpu16_hardware::{Cpu, CpuError, Device, Register, shared};
use pretty_assertions::assert_eq;

use crate::common::builder::instruction::{op, sp, val};
use crate::common::{Program, RecordingDevice, TestContext, basic, lit, special};

fn flux_capacitor() -> RecordingDevice {
    RecordingDevice::new(0x5555, 0x0031_3373, 0x0300, "Flux Capacitor")
}

#[test]
fn hwn_counts_attached_devices() {
    let mut ctx = TestContext::new().load(&[special(sp::HWN, val::A)]);
    for id in 0..3 {
        let (_, device) = RecordingDevice::new(id, 0, 0, "probe").into_handles();
        ctx.cpu.attach_device(device).unwrap();
    }
    assert_eq!(ctx.step(), 2);
    assert_eq!(ctx.reg(Register::A), 3);
}

#[test]
fn hwq_reports_device_identity() {
    let mut ctx = TestContext::new().load(&[special(sp::HWQ, lit(0))]);
    let (_, device) = flux_capacitor().into_handles();
    ctx.cpu.attach_device(device).unwrap();

    assert_eq!(ctx.step(), 4);
    assert_eq!(ctx.reg(Register::A), 0x5555);
    assert_eq!(ctx.reg(Register::B), 0x0000);
    assert_eq!(ctx.reg(Register::C), 0x0300);
    assert_eq!(ctx.reg(Register::X), 0x3373);
    assert_eq!(ctx.reg(Register::Y), 0x0031);
}

#[test]
fn hwq_for_absent_index_loads_zeros() {
    let mut ctx = TestContext::new().load(&[special(sp::HWQ, lit(5))]);
    for reg in [Register::A, Register::B, Register::C, Register::X, Register::Y] {
        ctx.set_reg(reg, 0xaaaa);
    }
    ctx.step();
    for reg in [Register::A, Register::B, Register::C, Register::X, Register::Y] {
        assert_eq!(ctx.reg(reg), 0, "{reg}");
    }
}

#[test]
fn hwi_calls_device_with_live_registers() {
    let program = [basic(op::SET, val::A, lit(7)), special(sp::HWI, lit(0))];
    let mut ctx = TestContext::new().load(&program);
    let mut device = flux_capacitor();
    device.reply = Some((Register::B, 0xbeef));
    let (probe, device) = device.into_handles();
    ctx.cpu.attach_device(device).unwrap();

    ctx.step();
    assert_eq!(ctx.step(), 4);

    assert_eq!(probe.lock().unwrap().interrupts, vec![7]);
    assert_eq!(ctx.reg(Register::B), 0xbeef);
    assert_eq!(ctx.cpu.stats().hardware_interrupts, 1);
}

#[test]
fn hwi_to_absent_index_is_ignored() {
    let mut ctx = TestContext::new().load(&[special(sp::HWI, lit(3))]);
    let (probe, device) = flux_capacitor().into_handles();
    ctx.cpu.attach_device(device).unwrap();
    assert_eq!(ctx.step(), 4);
    assert!(probe.lock().unwrap().interrupts.is_empty());
    assert_eq!(ctx.cpu.stats().hardware_interrupts, 0);
}

#[test]
fn device_raised_interrupt_reaches_handler() {
    let program = Program::new()
        .special(sp::IAS, val::NEXT, &[0x0010])
        .special(sp::HWI, lit(0), &[])
        .basic(op::SET, val::B, lit(1), &[])
        .org(0x10)
        .basic(op::SET, val::C, val::A, &[])
        .build();
    let mut ctx = TestContext::new().load(&program);
    let mut device = flux_capacitor();
    device.raise_on_interrupt = Some(0x99);
    let (_, device) = device.into_handles();
    ctx.cpu.attach_device(device).unwrap();

    ctx.run_steps(2);
    assert_eq!(ctx.cpu.pending_interrupts(), vec![0x99]);
    ctx.step();
    assert_eq!(ctx.reg(Register::C), 0x99);
}

#[test]
fn on_cycle_runs_once_per_elapsed_cycle() {
    let program = [basic(op::SET, val::A, lit(1)), basic(op::ADD, val::A, lit(1))];
    let mut ctx = TestContext::new().load(&program);
    let (probe, device) = flux_capacitor().into_handles();
    ctx.cpu.attach_device(device).unwrap();

    ctx.run_steps(2);
    assert_eq!(probe.lock().unwrap().cycles, vec![1, 2, 3]);
}

#[test]
fn device_raised_overflow_is_reported_by_step() {
    let mut config = Config::default();
    config.interrupts.queue_capacity = 0;
    config.interrupts.overflow_policy = OverflowPolicy::Fail;
    let mut cpu = Cpu::new(&config);
    cpu.flash(&[special(sp::HWI, lit(0)), basic(op::SET, val::A, lit(1))])
        .unwrap();
    let mut device = flux_capacitor();
    device.raise_on_interrupt = Some(0x10);
    let (_, device) = device.into_handles();
    cpu.attach_device(device).unwrap();

    assert_eq!(
        cpu.step(),
        Err(CpuError::InterruptQueueFull {
            message: 0x10,
            capacity: 0
        })
    );
    assert_eq!(cpu.cycles(), 4);
    assert_eq!(cpu.step(), Ok(1));
}

#[test]
fn attaching_twice_is_rejected() {
    let mut cpu = Cpu::default();
    let (_, device) = flux_capacitor().into_handles();
    assert_eq!(cpu.attach_device(device.clone()), Ok(0));
    assert!(matches!(
        cpu.attach_device(device),
        Err(CpuError::InvalidDeviceOperation(_))
    ));
    assert_eq!(cpu.device_count(), 1);
}

#[test]
fn detaching_unknown_device_is_rejected() {
    let mut cpu = Cpu::default();
    let (_, device) = flux_capacitor().into_handles();
    assert!(matches!(
        cpu.detach_device(&device),
        Err(CpuError::InvalidDeviceOperation(_))
    ));
}

#[test]
fn detach_shifts_later_indices_down() {
    let mut cpu = Cpu::default();
    let handles: Vec<_> = (0..3)
        .map(|id| RecordingDevice::new(id, 0, 0, "probe").into_handles().1)
        .collect();
    for device in &handles {
        cpu.attach_device(device.clone()).unwrap();
    }

    cpu.detach_device(&handles[0]).unwrap();

    assert_eq!(cpu.device_count(), 2);
    assert_eq!(cpu.device_index(&handles[0]), None);
    assert_eq!(cpu.device_index(&handles[1]), Some(0));
    assert_eq!(cpu.device_index(&handles[2]), Some(1));

    cpu.flash(&[special(sp::HWQ, lit(1))]).unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.regs.read(Register::A), 2);
}

#[test]
fn device_metadata_is_mutable_through_the_trait() {
    let (probe, device) = flux_capacitor().into_handles();
    {
        let mut guard = device.lock().unwrap();
        assert_eq!(guard.info().id, 0x5555);
        assert_eq!(guard.info().manufacturer, 0x0031_3373);
        assert_eq!(guard.info().version, 0x0300);
        assert_eq!(guard.name(), "Flux Capacitor");
        guard.info_mut().version = 0x0301;
    }
    assert_eq!(probe.lock().unwrap().info_mut().version, 0x0301);
}

#[test]
fn generic_clock_ticks_through_the_cpu() {
    // SET A, 0 ; SET B, 1 ; HWI 0 ; SET A, 1 ; HWI 0
    let program = [
        basic(op::SET, val::A, lit(0)),
        basic(op::SET, val::B, lit(1)),
        special(sp::HWI, lit(0)),
        basic(op::SET, val::A, lit(1)),
        special(sp::HWI, lit(0)),
    ];
    let mut ctx = TestContext::new().load(&program);
    // 120 Hz makes one tick every two cycles.
    ctx.cpu.attach_device(shared(Clock::new(120))).unwrap();

    ctx.run_steps(5);
    // Four cycles of the first HWI and one of SET elapse before the query.
    assert_eq!(ctx.reg(Register::C), 2);
}
