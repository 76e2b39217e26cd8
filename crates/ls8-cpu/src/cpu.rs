//! LS-8 CPU core.
//!
//! Each `step()` executes one machine cycle: interrupt check, a fixed
//! three-byte fetch, decode, execute. Instructions complete atomically
//! within a cycle; there is no sub-instruction timing.

use ls8_core::Bus;

use crate::alu;
use crate::flags::{E, Flags, G, L};
use crate::opcodes::Opcode;
use crate::registers::Registers;
use crate::{Error, Result};

/// Base address of the interrupt vector table. The vector for line *i*
/// lives at `VECTOR_BASE + i`.
pub const VECTOR_BASE: u8 = 0xF8;

/// Interrupt line wired to the periodic timer.
pub const TIMER_LINE: u8 = 0;

/// Execution state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Fetching and executing instructions.
    Running,
    /// Stopped by HLT or a fatal fault; `step()` is a no-op.
    Halted,
}

/// The LS-8 CPU.
///
/// Owns registers and execution state only; memory and console output
/// live behind the [`Bus`] passed into `step()`.
#[derive(Debug)]
pub struct Ls8 {
    /// CPU registers (R0-R7, PC, FL).
    pub regs: Registers,

    /// Current execution state.
    state: State,

    /// Retired instruction count (for traces and cycle limits).
    instructions: u64,
}

impl Default for Ls8 {
    fn default() -> Self {
        Self::new()
    }
}

impl Ls8 {
    /// Create a CPU in reset state: PC 0, SP at its start value, running.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            state: State::Running,
            instructions: 0,
        }
    }

    /// Execute one machine cycle.
    ///
    /// Order within the cycle: service an eligible interrupt (which
    /// consumes the cycle), otherwise fetch the opcode and both operand
    /// bytes, decode, execute. A fatal fault halts the CPU and is
    /// returned once; after that `step()` does nothing.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<()> {
        if self.state == State::Halted {
            return Ok(());
        }

        // Interrupt entry is this cycle's work; the handler's first
        // instruction runs on the next step.
        if self.service_interrupt(bus) {
            return Ok(());
        }

        // Fixed three-byte fetch window. Short programs read whatever
        // follows in memory; addresses wrap at 0xFF.
        let pc = self.regs.pc;
        let byte = bus.read(pc);
        let operand_a = bus.read(pc.wrapping_add(1));
        let operand_b = bus.read(pc.wrapping_add(2));

        let Some(opcode) = Opcode::from_byte(byte) else {
            self.state = State::Halted;
            return Err(Error::IllegalInstruction { opcode: byte, pc });
        };

        match self.execute(bus, opcode, operand_a, operand_b) {
            Ok(()) => {
                self.instructions += 1;
                Ok(())
            }
            Err(err) => {
                self.state = State::Halted;
                Err(err)
            }
        }
    }

    /// Run until the CPU halts or faults.
    pub fn run<B: Bus>(&mut self, bus: &mut B) -> Result<()> {
        while self.state == State::Running {
            self.step(bus)?;
        }
        Ok(())
    }

    /// Raise interrupt line `line` (0-7): set its bit in IS.
    ///
    /// The interrupt is serviced at the start of a later cycle, once the
    /// mask allows it.
    pub fn raise_interrupt(&mut self, line: u8) {
        debug_assert!(line < 8, "interrupt line out of range: {line}");
        if line < 8 {
            self.regs.set_is(self.regs.is() | (1 << line));
        }
    }

    /// Reset to power-on state. Memory is untouched; reloading the
    /// program is the machine's job.
    pub fn reset(&mut self) {
        self.regs = Registers::new();
        self.state = State::Running;
        self.instructions = 0;
    }

    /// Program counter.
    #[must_use]
    pub fn pc(&self) -> u8 {
        self.regs.pc
    }

    /// Stack pointer (R7).
    #[must_use]
    pub fn sp(&self) -> u8 {
        self.regs.sp()
    }

    /// Flags register.
    #[must_use]
    pub fn flags(&self) -> Flags {
        self.regs.fl
    }

    /// Read register `index`.
    #[must_use]
    pub fn register(&self, index: u8) -> u8 {
        self.regs.get(index)
    }

    /// True once HLT or a fatal fault has stopped execution.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.state == State::Halted
    }

    /// Retired instruction count.
    #[must_use]
    pub fn instructions(&self) -> u64 {
        self.instructions
    }

    /// Check for an eligible interrupt and enter its handler.
    ///
    /// Returns true if an interrupt was serviced this cycle.
    fn service_interrupt<B: Bus>(&mut self, bus: &mut B) -> bool {
        let eligible = self.regs.im() & self.regs.is();
        if eligible == 0 {
            return false;
        }

        // Lowest eligible line wins; the rest stay pending in IS.
        let line = eligible.trailing_zeros() as u8;
        self.regs.set_is(self.regs.is() & !(1 << line));

        // Save PC, FL, then R0-R6 in ascending order. The handler starts
        // with all of them zeroed, IM included, so nothing nests.
        self.push(bus, self.regs.pc);
        self.push(bus, self.regs.fl.to_byte());
        self.regs.fl = Flags::new();
        for reg in 0..7u8 {
            self.push(bus, self.regs.get(reg));
            self.regs.set(reg, 0);
        }

        self.regs.pc = bus.read(VECTOR_BASE.wrapping_add(line));
        true
    }

    /// Execute one decoded instruction.
    ///
    /// Arms that write PC return early; everything else falls through to
    /// the shared advance by the instruction's width.
    fn execute<B: Bus>(
        &mut self,
        bus: &mut B,
        opcode: Opcode,
        operand_a: u8,
        operand_b: u8,
    ) -> Result<()> {
        // Register operands carry three significant bits.
        let reg_a = operand_a & 0x07;
        let reg_b = operand_b & 0x07;

        match opcode {
            // No effect
            Opcode::Nop => {}

            // Stop; PC stays on the HLT instruction
            Opcode::Hlt => {
                self.state = State::Halted;
                return Ok(());
            }

            // Register = immediate
            Opcode::Ldi => self.regs.set(reg_a, operand_b),

            // Register a = memory at the address in register b
            Opcode::Ld => {
                let value = bus.read(self.regs.get(reg_b));
                self.regs.set(reg_a, value);
            }

            // Memory at the address in register a = register b
            Opcode::St => bus.write(self.regs.get(reg_a), self.regs.get(reg_b)),

            // Console output
            Opcode::Prn => bus.print_value(self.regs.get(reg_a)),
            Opcode::Pra => bus.print_ascii(self.regs.get(reg_a)),

            // ALU: wrapping arithmetic
            Opcode::Add => self.alu_binary(reg_a, reg_b, alu::add),
            Opcode::Sub => self.alu_binary(reg_a, reg_b, alu::sub),
            Opcode::Mul => self.alu_binary(reg_a, reg_b, alu::mul),

            // ALU: division faults on a zero divisor
            Opcode::Div => self.alu_checked(reg_a, reg_b, alu::div)?,
            Opcode::Mod => self.alu_checked(reg_a, reg_b, alu::modulo)?,

            // ALU: bitwise
            Opcode::And => self.alu_binary(reg_a, reg_b, alu::and),
            Opcode::Or => self.alu_binary(reg_a, reg_b, alu::or),
            Opcode::Xor => self.alu_binary(reg_a, reg_b, alu::xor),
            Opcode::Shl => self.alu_binary(reg_a, reg_b, alu::shl),
            Opcode::Shr => self.alu_binary(reg_a, reg_b, alu::shr),
            Opcode::Not => {
                let value = alu::not(self.regs.get(reg_a));
                self.regs.set(reg_a, value);
            }

            // Compare writes FL only; registers are untouched
            Opcode::Cmp => {
                self.regs.fl = alu::compare(self.regs.get(reg_a), self.regs.get(reg_b));
            }

            // Stack
            Opcode::Push => self.push(bus, self.regs.get(reg_a)),
            Opcode::Pop => {
                let value = self.pop(bus);
                self.regs.set(reg_a, value);
            }

            // Subroutines: CALL pushes the address of the next instruction
            Opcode::Call => {
                self.push(bus, self.regs.pc.wrapping_add(2));
                self.regs.pc = self.regs.get(reg_a);
                return Ok(());
            }
            Opcode::Ret => {
                self.regs.pc = self.pop(bus);
                return Ok(());
            }

            // Jumps: taken jumps set PC, fall-through advances past the
            // operand byte
            Opcode::Jmp => {
                self.regs.pc = self.regs.get(reg_a);
                return Ok(());
            }
            Opcode::Jeq => {
                self.jump_if(reg_a, self.regs.fl.is_set(E));
                return Ok(());
            }
            Opcode::Jne => {
                self.jump_if(reg_a, !self.regs.fl.is_set(E));
                return Ok(());
            }
            Opcode::Jlt => {
                self.jump_if(reg_a, self.regs.fl.is_set(L));
                return Ok(());
            }
            Opcode::Jgt => {
                self.jump_if(reg_a, self.regs.fl.is_set(G));
                return Ok(());
            }
            Opcode::Jge => {
                self.jump_if(reg_a, !self.regs.fl.is_set(L));
                return Ok(());
            }
            Opcode::Jle => {
                self.jump_if(reg_a, !self.regs.fl.is_set(G));
                return Ok(());
            }

            // Interrupt return: exact mirror of the entry sequence
            Opcode::Iret => {
                for reg in (0..7u8).rev() {
                    let value = self.pop(bus);
                    self.regs.set(reg, value);
                }
                let fl = self.pop(bus);
                self.regs.fl = Flags::from_byte(fl);
                self.regs.pc = self.pop(bus);
                return Ok(());
            }
        }

        self.regs.pc = self.regs.pc.wrapping_add(opcode.width());
        Ok(())
    }

    /// Apply a two-register ALU operation, storing the result in the
    /// first register.
    fn alu_binary(&mut self, reg_a: u8, reg_b: u8, op: fn(u8, u8) -> u8) {
        let result = op(self.regs.get(reg_a), self.regs.get(reg_b));
        self.regs.set(reg_a, result);
    }

    /// Apply a fallible ALU operation; a `None` result is a fault at the
    /// current PC.
    fn alu_checked(&mut self, reg_a: u8, reg_b: u8, op: fn(u8, u8) -> Option<u8>) -> Result<()> {
        match op(self.regs.get(reg_a), self.regs.get(reg_b)) {
            Some(result) => {
                self.regs.set(reg_a, result);
                Ok(())
            }
            None => Err(Error::DivisionByZero { pc: self.regs.pc }),
        }
    }

    /// Take a conditional jump, or fall through past the operand byte.
    fn jump_if(&mut self, reg: u8, taken: bool) {
        if taken {
            self.regs.pc = self.regs.get(reg);
        } else {
            self.regs.pc = self.regs.pc.wrapping_add(2);
        }
    }

    /// Push a value onto the stack.
    fn push<B: Bus>(&mut self, bus: &mut B, value: u8) {
        let address = self.regs.push();
        bus.write(address, value);
    }

    /// Pop a value from the stack.
    fn pop<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let address = self.regs.pop();
        bus.read(address)
    }
}
