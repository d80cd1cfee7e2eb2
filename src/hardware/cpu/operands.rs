//! Resolves the seven operand addressing kinds (plus plain registers) to bus
//! accesses or register reads, each charging the M-cycles a real access would take.

use crate::hardware::bus::MemoryMapper;
use crate::hardware::cpu::execute::{InstructionAddress, WrapperEnum};
use crate::hardware::cpu::traits::{SetU16, SetU8, ToU16, ToU8};
use crate::hardware::cpu::CPU;
use crate::hardware::registers::{Reg16, Reg8};

impl<M: MemoryMapper> CPU<M> {
    pub(crate) fn read_u8_value<T: Copy>(&mut self, target: T) -> u8
    where
        Self: ToU8<T>,
    {
        self.get_reg_value(target)
    }

    pub(crate) fn set_u8_value<T: Copy>(&mut self, target: T, value: u8)
    where
        Self: SetU8<T>,
    {
        self.set_value(target, value)
    }

    pub(crate) fn read_u16_value<T: Copy>(&mut self, target: T) -> u16
    where
        Self: ToU16<T>,
    {
        self.get_reg_value16(target)
    }

    pub(crate) fn set_u16_value<T: Copy>(&mut self, target: T, value: u16)
    where
        Self: SetU16<T>,
    {
        self.set_value16(target, value)
    }
}

impl<M: MemoryMapper> ToU8<Reg8> for CPU<M> {
    fn get_reg_value(&mut self, target: Reg8) -> u8 {
        self.registers.get8(target)
    }
}

impl<M: MemoryMapper> SetU8<Reg8> for CPU<M> {
    fn set_value(&mut self, target: Reg8, value: u8) {
        self.registers.set8(target, value)
    }
}

impl<M: MemoryMapper> ToU8<InstructionAddress> for CPU<M> {
    fn get_reg_value(&mut self, target: InstructionAddress) -> u8 {
        match target {
            InstructionAddress::BCI => {
                let address = self.registers.bc();
                self.read_byte_cycle(address)
            }
            InstructionAddress::DEI => {
                let address = self.registers.de();
                self.read_byte_cycle(address)
            }
            InstructionAddress::HLI => {
                let address = self.registers.hl();
                self.read_byte_cycle(address)
            }
            InstructionAddress::HLIP => {
                let address = self.registers.hl();
                let value = self.read_byte_cycle(address);
                self.registers.set_hl(address.wrapping_add(1));
                value
            }
            InstructionAddress::HLIN => {
                let address = self.registers.hl();
                let value = self.read_byte_cycle(address);
                self.registers.set_hl(address.wrapping_sub(1));
                value
            }
            InstructionAddress::DIRECT => self.get_instr_u8(),
            InstructionAddress::DirectMem => {
                let address = self.get_instr_u16();
                self.read_byte_cycle(address)
            }
            InstructionAddress::IoDirect => {
                let offset = self.get_instr_u8();
                self.read_byte_cycle(0xFF00 | offset as u16)
            }
            InstructionAddress::IoC => {
                let offset = self.registers.c;
                self.read_byte_cycle(0xFF00 | offset as u16)
            }
        }
    }
}

impl<M: MemoryMapper> SetU8<InstructionAddress> for CPU<M> {
    fn set_value(&mut self, target: InstructionAddress, value: u8) {
        match target {
            InstructionAddress::BCI => {
                let address = self.registers.bc();
                self.write_byte_cycle(address, value);
            }
            InstructionAddress::DEI => {
                let address = self.registers.de();
                self.write_byte_cycle(address, value);
            }
            InstructionAddress::HLI => {
                let address = self.registers.hl();
                self.write_byte_cycle(address, value);
            }
            InstructionAddress::HLIP => {
                let address = self.registers.hl();
                self.write_byte_cycle(address, value);
                self.registers.set_hl(address.wrapping_add(1));
            }
            InstructionAddress::HLIN => {
                let address = self.registers.hl();
                self.write_byte_cycle(address, value);
                self.registers.set_hl(address.wrapping_sub(1));
            }
            InstructionAddress::DIRECT => {
                unreachable!("DIRECT is an immediate operand, never a write destination")
            }
            InstructionAddress::DirectMem => {
                let address = self.get_instr_u16();
                self.write_byte_cycle(address, value);
            }
            InstructionAddress::IoDirect => {
                let offset = self.get_instr_u8();
                self.write_byte_cycle(0xFF00 | offset as u16, value);
            }
            InstructionAddress::IoC => {
                let offset = self.registers.c;
                self.write_byte_cycle(0xFF00 | offset as u16, value);
            }
        }
    }
}

impl<M: MemoryMapper> ToU8<WrapperEnum> for CPU<M> {
    fn get_reg_value(&mut self, target: WrapperEnum) -> u8 {
        match target {
            WrapperEnum::Reg8(reg) => self.read_u8_value(reg),
            WrapperEnum::InstructionAddress(address) => self.read_u8_value(address),
        }
    }
}

impl<M: MemoryMapper> SetU8<WrapperEnum> for CPU<M> {
    fn set_value(&mut self, target: WrapperEnum, value: u8) {
        match target {
            WrapperEnum::Reg8(reg) => self.set_u8_value(reg, value),
            WrapperEnum::InstructionAddress(address) => self.set_u8_value(address, value),
        }
    }
}

impl<M: MemoryMapper> ToU16<Reg16> for CPU<M> {
    fn get_reg_value16(&mut self, target: Reg16) -> u16 {
        self.registers.get16(target)
    }
}

impl<M: MemoryMapper> SetU16<Reg16> for CPU<M> {
    fn set_value16(&mut self, target: Reg16, value: u16) {
        self.registers.set16(target, value)
    }
}

impl<M: MemoryMapper> ToU16<InstructionAddress> for CPU<M> {
    fn get_reg_value16(&mut self, target: InstructionAddress) -> u16 {
        match target {
            InstructionAddress::DIRECT => self.get_instr_u16(),
            other => unreachable!("16-bit operand fetch unsupported for {:?}", other),
        }
    }
}

impl<M: MemoryMapper> SetU16<InstructionAddress> for CPU<M> {
    fn set_value16(&mut self, target: InstructionAddress, value: u16) {
        match target {
            InstructionAddress::DirectMem => {
                let address = self.get_instr_u16();
                self.write_short_cycle(address, value);
            }
            other => unreachable!("16-bit operand store unsupported for {:?}", other),
        }
    }
}
