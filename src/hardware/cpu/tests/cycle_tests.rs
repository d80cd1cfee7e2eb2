//! Validates exact per-opcode M-cycle counts against gbops, the CPU's most
//! timing-critical property: wrong counts here desync the PPU/timer cadence that
//! `GameBoy::tick()` depends on.

use crate::hardware::cpu::tests::{initial_cpu, read_short, run_instruction, set_short};
use crate::io::interrupts::{Interrupt, InterruptFlags};

#[test]
fn test_nop_costs_one_m_cycle() {
    let mut cpu = initial_cpu();
    cpu.mmu.mem[0] = 0x00; // NOP

    assert_eq!(run_instruction(&mut cpu), 1);
    assert_eq!(cpu.cycles_performed, 4);
}

#[test]
fn test_register_alu_op_costs_one_m_cycle() {
    let mut cpu = initial_cpu();
    cpu.mmu.mem[0] = 0x80; // ADD A,B

    assert_eq!(run_instruction(&mut cpu), 1);
    assert_eq!(cpu.cycles_performed, 4);
}

#[test]
fn test_indirect_hl_alu_op_costs_two_m_cycles() {
    let mut cpu = initial_cpu();
    cpu.mmu.mem[0] = 0x86; // ADD A,(HL)

    assert_eq!(run_instruction(&mut cpu), 2);
    assert_eq!(cpu.cycles_performed, 8);
}

#[test]
fn test_ld_direct_16_sp_costs_five_m_cycles() {
    let mut cpu = initial_cpu();
    cpu.mmu.mem[0] = 0x08; // LD (a16),SP
    set_short(&mut cpu, 1, 0xC000);
    cpu.registers.sp = 0x1234;

    assert_eq!(run_instruction(&mut cpu), 5);
    assert_eq!(cpu.cycles_performed, 20);
    assert_eq!(read_short(&cpu, 0xC000), 0x1234);
}

#[test]
fn test_unconditional_ret_costs_four_m_cycles() {
    // Regression test: unconditional RET must not carry RET cc's leading decision cycle.
    let mut cpu = initial_cpu();
    cpu.mmu.mem[0] = 0xC9; // RET
    cpu.registers.sp = 0xC000;
    set_short(&mut cpu, 0xC000, 0x1234);

    assert_eq!(run_instruction(&mut cpu), 4);
    assert_eq!(cpu.cycles_performed, 16);
    assert_eq!(cpu.registers.pc, 0x1234);
}

#[test]
fn test_conditional_ret_costs_two_or_five_m_cycles() {
    let mut cpu = initial_cpu();
    cpu.mmu.mem[0] = 0xC0; // RET NZ
    cpu.registers.sp = 0xC000;
    set_short(&mut cpu, 0xC000, 0x1234);
    cpu.registers.set_zf(true); // condition false: not taken

    assert_eq!(run_instruction(&mut cpu), 2);
    assert_eq!(cpu.cycles_performed, 8);
    assert_eq!(cpu.registers.pc, 1);

    let mut cpu = initial_cpu();
    cpu.mmu.mem[0] = 0xC0; // RET NZ
    cpu.registers.sp = 0xC000;
    set_short(&mut cpu, 0xC000, 0x1234);
    cpu.registers.set_zf(false); // condition true: taken

    assert_eq!(run_instruction(&mut cpu), 5);
    assert_eq!(cpu.cycles_performed, 20);
    assert_eq!(cpu.registers.pc, 0x1234);
}

#[test]
fn test_reti_costs_four_m_cycles() {
    let mut cpu = initial_cpu();
    cpu.mmu.mem[0] = 0xD9; // RETI
    cpu.registers.sp = 0xC000;
    set_short(&mut cpu, 0xC000, 0x1234);

    assert_eq!(run_instruction(&mut cpu), 4);
    assert_eq!(cpu.cycles_performed, 16);
    assert!(cpu.mmu.interrupts.ime);
}

#[test]
fn test_unconditional_call_costs_six_m_cycles() {
    let mut cpu = initial_cpu();
    cpu.mmu.mem[0] = 0xCD; // CALL a16
    set_short(&mut cpu, 1, 0x1445);
    cpu.registers.sp = 0xFFFE;

    assert_eq!(run_instruction(&mut cpu), 6);
    assert_eq!(cpu.cycles_performed, 24);
    assert_eq!(cpu.registers.pc, 0x1445);
}

#[test]
fn test_interrupt_service_costs_five_m_cycles() {
    let mut cpu = initial_cpu();
    cpu.mmu.mem[0] = 0x00; // should not be fetched: interrupt pre-empts it
    cpu.registers.sp = 0xFFFE;
    cpu.mmu.interrupts.ime = true;
    cpu.mmu.interrupts.enable = InterruptFlags::from_bits_truncate(0x1F);
    cpu.mmu.interrupts.request(Interrupt::Timer);

    assert_eq!(run_instruction(&mut cpu), 5);
    assert_eq!(cpu.cycles_performed, 20);
    // The ISR fetches its first opcode (a NOP here) before retiring, advancing `pc`
    // one past the vector it jumped to.
    assert_eq!(cpu.registers.pc, Interrupt::Timer.vector() + 1);
    assert!(!cpu.mmu.interrupts.ime);
}

#[test]
fn test_halt_costs_one_m_cycle_per_call_until_woken() {
    let mut cpu = initial_cpu();
    cpu.halted = true;
    cpu.mmu.interrupts.enable = InterruptFlags::empty();

    cpu.execute_cycle().unwrap();
    assert_eq!(cpu.cycles_performed, 4);
    assert!(cpu.halted);

    cpu.mmu.interrupts.enable = InterruptFlags::from_bits_truncate(0x1F);
    cpu.mmu.interrupts.request(Interrupt::VBlank);

    cpu.execute_cycle().unwrap();
    assert_eq!(cpu.cycles_performed, 8);
    assert!(!cpu.halted);
}

#[test]
fn test_relative_jump_not_taken_vs_taken() {
    let mut cpu = initial_cpu();
    cpu.mmu.mem[0] = 0x20; // JR NZ,e8
    cpu.mmu.mem[1] = 10;
    cpu.registers.set_zf(true); // not taken

    assert_eq!(run_instruction(&mut cpu), 2);
    assert_eq!(cpu.cycles_performed, 8);

    let mut cpu = initial_cpu();
    cpu.mmu.mem[0] = 0x20; // JR NZ,e8
    cpu.mmu.mem[1] = 10;
    cpu.registers.set_zf(false); // taken

    assert_eq!(run_instruction(&mut cpu), 3);
    assert_eq!(cpu.cycles_performed, 12);
    assert_eq!(cpu.registers.pc, 12);
}
