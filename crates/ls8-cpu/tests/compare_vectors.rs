//! CMP / conditional-jump vectors.
//!
//! Each case in `data/compare_vectors.json` names two operands, the
//! expected FL byte after CMP, and whether each of the six conditional
//! jumps takes. The harness assembles a fresh program per jump and
//! checks which side of the branch ran.

use ls8_core::SimpleBus;
use ls8_cpu::Ls8;
use serde::Deserialize;
use std::collections::HashMap;

/// JSON test case format.
#[derive(Deserialize)]
struct CompareCase {
    name: String,
    a: u8,
    b: u8,
    flags: u8,
    /// Branch mnemonic (lowercase) to expected outcome.
    taken: HashMap<String, bool>,
}

fn load_cases() -> Vec<CompareCase> {
    serde_json::from_str(include_str!("data/compare_vectors.json")).expect("valid test vectors")
}

fn jump_opcode(mnemonic: &str) -> u8 {
    match mnemonic {
        "jeq" => 0x55,
        "jne" => 0x56,
        "jgt" => 0x57,
        "jlt" => 0x58,
        "jle" => 0x59,
        "jge" => 0x5A,
        other => panic!("unknown jump mnemonic {other:?}"),
    }
}

/// Assemble: compare a against b, branch to a taken marker or fall
/// through to a not-taken marker, leaving the verdict in R3.
fn branch_program(a: u8, b: u8, jump: u8) -> [u8; 22] {
    [
        0x82, 0x00, a, //    LDI R0, a
        0x82, 0x01, b, //    LDI R1, b
        0xA7, 0x00, 0x01, // CMP R0, R1
        0x82, 0x02, 0x12, // LDI R2, 0x12
        jump, 0x02, //       Jxx R2
        0x82, 0x03, 0x01, // LDI R3, 1 (not taken)
        0x01, //             HLT
        0x82, 0x03, 0x02, // LDI R3, 2 (taken)
        0x01, //             HLT
    ]
}

fn run_to_halt(program: &[u8]) -> Ls8 {
    let mut bus = SimpleBus::new();
    bus.load(0x00, program);

    let mut cpu = Ls8::new();
    let mut steps = 0;
    while !cpu.is_halted() && steps < 100 {
        cpu.step(&mut bus).expect("vector program faulted");
        steps += 1;
    }
    assert!(cpu.is_halted(), "vector program never halted");
    cpu
}

#[test]
fn test_cmp_flag_bytes() {
    for case in load_cases() {
        let program = [
            0x82, 0x00, case.a, // LDI R0, a
            0x82, 0x01, case.b, // LDI R1, b
            0xA7, 0x00, 0x01, //   CMP R0, R1
            0x01, //               HLT
        ];
        let cpu = run_to_halt(&program);

        assert_eq!(
            cpu.flags().to_byte(),
            case.flags,
            "FL after CMP in case {:?}",
            case.name,
        );
    }
}

#[test]
fn test_branch_outcomes() {
    for case in load_cases() {
        for (mnemonic, expect_taken) in &case.taken {
            let program = branch_program(case.a, case.b, jump_opcode(mnemonic));
            let cpu = run_to_halt(&program);

            let expected = if *expect_taken { 2 } else { 1 };
            assert_eq!(
                cpu.register(3),
                expected,
                "{} in case {:?} (a={}, b={})",
                mnemonic,
                case.name,
                case.a,
                case.b,
            );
        }
    }
}
