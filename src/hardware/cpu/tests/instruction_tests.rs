//! ALU and flag-mutation tests for instructions that call private CPU methods
//! directly rather than going through `execute_cycle()`.

use pretty_assertions::assert_eq;

use crate::hardware::cpu::execute::JumpModifier;
use crate::hardware::cpu::tests::initial_cpu;
use crate::hardware::registers::Reg16::*;
use crate::hardware::registers::Reg8::*;

#[test]
fn test_add() {
    let mut cpu = initial_cpu();
    cpu.registers.a = 0x3A;
    cpu.registers.b = 0xC6;

    cpu.add(B);

    assert_eq!(cpu.registers.a, 0x00);
    assert!(cpu.registers.zf());
    assert!(!cpu.registers.n());
    assert!(cpu.registers.h());
    assert!(cpu.registers.cf());
}

#[test]
fn test_adc_with_carry() {
    let mut cpu = initial_cpu();
    cpu.registers.a = 0xE1;
    cpu.registers.b = 0x0F;
    cpu.registers.set_cf(true);

    cpu.adc(B);

    assert_eq!(cpu.registers.a, 0xF1);
    assert!(cpu.registers.h());
    assert!(!cpu.registers.cf());
}

#[test]
fn test_sub() {
    let mut cpu = initial_cpu();
    cpu.registers.a = 0x3E;
    cpu.registers.b = 0x3E;

    cpu.sub(B);

    assert_eq!(cpu.registers.a, 0x00);
    assert!(cpu.registers.zf());
    assert!(cpu.registers.n());
}

#[test]
fn test_and() {
    let mut cpu = initial_cpu();
    cpu.registers.a = 0x5A;
    cpu.registers.b = 0x3F;

    cpu.and(B);

    assert_eq!(cpu.registers.a, 0x1A);
    assert!(!cpu.registers.zf());
    assert!(cpu.registers.h());
    assert!(!cpu.registers.cf());
}

#[test]
fn test_xor() {
    let mut cpu = initial_cpu();
    cpu.registers.a = 0xFF;

    cpu.xor(A);

    assert_eq!(cpu.registers.a, 0);
    assert!(cpu.registers.zf());
}

#[test]
fn test_compare_does_not_mutate_a() {
    let mut cpu = initial_cpu();
    cpu.registers.a = 0x3C;
    cpu.registers.b = 0x2F;

    cpu.compare(B);

    assert_eq!(cpu.registers.a, 0x3C);
    assert!(!cpu.registers.zf());
    assert!(cpu.registers.n());
    assert!(cpu.registers.h());
}

#[test]
fn test_increment_sets_half_carry() {
    let mut cpu = initial_cpu();
    cpu.registers.a = 0x0F;

    cpu.increment(A);

    assert_eq!(cpu.registers.a, 0x10);
    assert!(cpu.registers.h());
    assert!(!cpu.registers.zf());
}

#[test]
fn test_increment_wraps_to_zero() {
    let mut cpu = initial_cpu();
    cpu.registers.a = 0xFF;

    cpu.increment(A);

    assert_eq!(cpu.registers.a, 0x00);
    assert!(cpu.registers.zf());
}

#[test]
fn test_decrement_sets_half_carry() {
    let mut cpu = initial_cpu();
    cpu.registers.l = 0x00;

    cpu.decrement(L);

    assert_eq!(cpu.registers.l, 0xFF);
    assert!(cpu.registers.h());
    assert!(cpu.registers.n());
}

#[test]
fn test_daa_after_addition() {
    let mut cpu = initial_cpu();
    // 0x45 + 0x38 = 0x7D raw, BCD-invalid; DAA should correct it to 0x83.
    cpu.registers.a = 0x45;
    cpu.registers.b = 0x38;
    cpu.add(B);

    cpu.daa();

    assert_eq!(cpu.registers.a, 0x83);
    assert!(!cpu.registers.cf());
}

#[test]
fn test_cpl() {
    let mut cpu = initial_cpu();
    cpu.registers.a = 0x35;

    cpu.cpl();

    assert_eq!(cpu.registers.a, 0xCA);
    assert!(cpu.registers.n());
    assert!(cpu.registers.h());
}

#[test]
fn test_scf() {
    let mut cpu = initial_cpu();
    cpu.registers.set_cf(false);

    cpu.scf();

    assert!(cpu.registers.cf());
    assert!(!cpu.registers.n());
    assert!(!cpu.registers.h());
}

#[test]
fn test_ccf_toggles() {
    let mut cpu = initial_cpu();
    cpu.registers.set_cf(false);

    cpu.ccf();
    assert!(cpu.registers.cf());

    cpu.ccf();
    assert!(!cpu.registers.cf());
}

#[test]
fn test_rlca_wraps_bit_7_into_carry_and_bit_0() {
    let mut cpu = initial_cpu();
    cpu.registers.a = 0x85;

    cpu.rlca();

    assert_eq!(cpu.registers.a, 0x0B);
    assert!(cpu.registers.cf());
    assert!(!cpu.registers.zf());
}

#[test]
fn test_rrca() {
    let mut cpu = initial_cpu();
    cpu.registers.a = 0x3B;

    cpu.rrca();

    assert_eq!(cpu.registers.a, 0x9D);
    assert!(cpu.registers.cf());
}

#[test]
fn test_rla_through_carry() {
    let mut cpu = initial_cpu();
    cpu.registers.a = 0x95;
    cpu.registers.set_cf(true);

    cpu.rla();

    assert_eq!(cpu.registers.a, 0x2B);
    assert!(cpu.registers.cf());
}

#[test]
fn test_rra_through_carry() {
    let mut cpu = initial_cpu();
    cpu.registers.a = 0x81;
    cpu.registers.set_cf(false);

    cpu.rra();

    assert_eq!(cpu.registers.a, 0x40);
    assert!(cpu.registers.cf());
}

#[test]
fn test_prefixed_rlc_sets_zero_flag() {
    let mut cpu = initial_cpu();
    cpu.registers.b = 0x00;

    cpu.rlc(B);

    assert_eq!(cpu.registers.b, 0x00);
    assert!(cpu.registers.zf());
    assert!(!cpu.registers.cf());
}

#[test]
fn test_prefixed_rrc() {
    let mut cpu = initial_cpu();
    cpu.registers.b = 0x01;

    cpu.rrc(B);

    assert_eq!(cpu.registers.b, 0x80);
    assert!(cpu.registers.cf());
}

#[test]
fn test_prefixed_sla() {
    let mut cpu = initial_cpu();
    cpu.registers.c = 0x80;

    cpu.sla(C);

    assert_eq!(cpu.registers.c, 0x00);
    assert!(cpu.registers.zf());
    assert!(cpu.registers.cf());
}

#[test]
fn test_prefixed_sra_keeps_sign_bit() {
    let mut cpu = initial_cpu();
    cpu.registers.d = 0x8A;

    cpu.sra(D);

    assert_eq!(cpu.registers.d, 0xC5);
    assert!(!cpu.registers.cf());
}

#[test]
fn test_prefixed_swap() {
    let mut cpu = initial_cpu();
    cpu.registers.e = 0xF0;

    cpu.swap(E);

    assert_eq!(cpu.registers.e, 0x0F);
    assert!(!cpu.registers.cf());
}

#[test]
fn test_prefixed_srl() {
    let mut cpu = initial_cpu();
    cpu.registers.h = 0x01;

    cpu.srl(H);

    assert_eq!(cpu.registers.h, 0x00);
    assert!(cpu.registers.zf());
    assert!(cpu.registers.cf());
}

#[test]
fn test_bit_set_and_clear() {
    let mut cpu = initial_cpu();
    cpu.registers.a = 0x80;

    cpu.bit(7, A);
    assert!(!cpu.registers.zf());

    cpu.bit(6, A);
    assert!(cpu.registers.zf());
}

#[test]
fn test_set_and_res() {
    let mut cpu = initial_cpu();
    cpu.registers.l = 0x00;

    cpu.set(3, L);
    assert_eq!(cpu.registers.l, 0x08);

    cpu.res(3, L);
    assert_eq!(cpu.registers.l, 0x00);
}

#[test]
fn test_push_and_pop_round_trips() {
    let mut cpu = initial_cpu();
    cpu.registers.sp = 0xFFFE;
    cpu.registers.set_bc(0xBEEF);

    cpu.push(BC);
    assert_eq!(cpu.registers.sp, 0xFFFC);

    cpu.registers.set_bc(0x0000);
    cpu.pop(BC);

    assert_eq!(cpu.registers.bc(), 0xBEEF);
    assert_eq!(cpu.registers.sp, 0xFFFE);
}

#[test]
fn test_rst_pushes_return_address_and_jumps() {
    let mut cpu = initial_cpu();
    cpu.registers.sp = 0xFFFE;
    cpu.registers.pc = 0x1500;

    cpu.rst(0x38);

    assert_eq!(cpu.registers.pc, 0x38);
    assert_eq!(cpu.registers.sp, 0xFFFC);
}

#[test]
fn test_call_and_ret_round_trip() {
    let mut cpu = initial_cpu();
    cpu.registers.sp = 0xFFFE;
    cpu.registers.pc = 0x100;
    cpu.mmu.mem[0x100] = 0x34;
    cpu.mmu.mem[0x101] = 0x12;

    cpu.call(JumpModifier::Always);

    assert_eq!(cpu.registers.pc, 0x1234);
    assert_eq!(cpu.registers.sp, 0xFFFC);

    cpu.ret(JumpModifier::Always);

    assert_eq!(cpu.registers.pc, 0x102);
    assert_eq!(cpu.registers.sp, 0xFFFE);
}

#[test]
fn test_add16_sets_half_carry_and_carry() {
    let mut cpu = initial_cpu();
    cpu.registers.set_hl(0x0FFF);
    cpu.registers.set_bc(0x0001);

    cpu.add16(BC);

    assert_eq!(cpu.registers.hl(), 0x1000);
    assert!(cpu.registers.h());
    assert!(!cpu.registers.cf());
}

#[test]
fn test_add_sp_negative_offset() {
    let mut cpu = initial_cpu();
    cpu.registers.sp = 0xFFF8;
    cpu.mmu.mem[0] = 0x02; // +2

    cpu.add_sp();

    assert_eq!(cpu.registers.sp, 0xFFFA);
    assert!(!cpu.registers.zf());
    assert!(!cpu.registers.n());
}
