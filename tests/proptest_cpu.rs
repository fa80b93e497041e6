//! Property-based tests for CPU invariants.
//!
//! These tests use proptest to check that the ALU, the status register and
//! the cycle accounting hold across the full input range on both chips.

use sim6502::{opcode_table, ChipVariant, Cpu, FlatMemory, OpcodeDefinition};
use proptest::prelude::*;

fn setup_cpu(variant: ChipVariant) -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.set_reset_vector(0x8000);
    Cpu::new(variant, memory)
}

fn changes_pc(def: &OpcodeDefinition) -> bool {
    def.mnemonic.starts_with("BB")
        || matches!(
            def.mnemonic,
            "BCC" | "BCS" | "BEQ" | "BMI" | "BNE" | "BPL" | "BVC" | "BVS" | "BRA" | "JMP" | "JSR"
                | "RTS" | "RTI" | "BRK" | "WAI" | "STP"
        )
}

/// Opcodes that execute and leave PC right after their operand.
fn straight_line_opcodes(variant: ChipVariant) -> Vec<u8> {
    opcode_table(variant)
        .iter()
        .filter(|def| !def.is_illegal() && !changes_pc(def))
        .map(|def| def.opcode)
        .collect()
}

fn variant_strategy() -> impl Strategy<Value = ChipVariant> {
    prop::sample::select(ChipVariant::ALL.to_vec())
}

// ========== Status Register ==========

proptest! {
    /// Break is never stored and Unused always reads back set.
    #[test]
    fn prop_status_round_trip(p in any::<u8>()) {
        let mut cpu = setup_cpu(ChipVariant::Nmos6502);
        cpu.set_status(p);

        prop_assert_eq!(cpu.status(), (p & !0x10) | 0x20);
    }

    #[test]
    fn prop_lda_immediate_sets_n_and_z(variant in variant_strategy(), value in any::<u8>()) {
        let mut cpu = setup_cpu(variant);
        cpu.memory_mut().load(0x8000, &[0xA9, value]);

        cpu.step().unwrap();

        prop_assert_eq!(cpu.a(), value);
        prop_assert_eq!(cpu.flag_n(), value & 0x80 != 0);
        prop_assert_eq!(cpu.flag_z(), value == 0);
    }
}

// ========== ADC/SBC ==========

proptest! {
    /// ADC computes A + M + C with signed overflow in V.
    #[test]
    fn prop_adc_binary_result(
        variant in variant_strategy(),
        a in any::<u8>(),
        operand in any::<u8>(),
        carry_in in any::<bool>(),
    ) {
        let mut cpu = setup_cpu(variant);
        cpu.set_a(a);
        cpu.set_flag_c(carry_in);
        cpu.memory_mut().load(0x8000, &[0x69, operand]);

        cpu.step().unwrap();

        let sum = a as u16 + operand as u16 + carry_in as u16;
        let result = sum as u8;
        prop_assert_eq!(cpu.a(), result);
        prop_assert_eq!(cpu.flag_c(), sum > 0xFF);
        prop_assert_eq!(cpu.flag_v(), (a ^ result) & (operand ^ result) & 0x80 != 0);
        prop_assert_eq!(cpu.flag_n(), result & 0x80 != 0);
        prop_assert_eq!(cpu.flag_z(), result == 0);
    }

    /// SBC computes A - M - !C; carry means no borrow.
    #[test]
    fn prop_sbc_binary_result(
        variant in variant_strategy(),
        a in any::<u8>(),
        operand in any::<u8>(),
        carry_in in any::<bool>(),
    ) {
        let mut cpu = setup_cpu(variant);
        cpu.set_a(a);
        cpu.set_flag_c(carry_in);
        cpu.memory_mut().load(0x8000, &[0xE9, operand]);

        cpu.step().unwrap();

        let diff = a as i16 - operand as i16 - (!carry_in) as i16;
        let result = diff as u8;
        prop_assert_eq!(cpu.a(), result);
        prop_assert_eq!(cpu.flag_c(), diff >= 0);
        prop_assert_eq!(cpu.flag_v(), (a ^ operand) & (a ^ result) & 0x80 != 0);
        prop_assert_eq!(cpu.flag_n(), result & 0x80 != 0);
        prop_assert_eq!(cpu.flag_z(), result == 0);
    }

    /// With D clear both chips agree on every ADC and SBC.
    #[test]
    fn prop_binary_arithmetic_matches_across_variants(
        opcode in prop::sample::select(vec![0x69u8, 0xE9]),
        a in any::<u8>(),
        operand in any::<u8>(),
        carry_in in any::<bool>(),
    ) {
        let mut results = Vec::new();
        for variant in ChipVariant::ALL {
            let mut cpu = setup_cpu(variant);
            cpu.set_a(a);
            cpu.set_flag_c(carry_in);
            cpu.memory_mut().load(0x8000, &[opcode, operand]);
            let cycles = cpu.step().unwrap();
            results.push((cpu.a(), cpu.status(), cycles));
        }

        prop_assert_eq!(results[0], results[1]);
    }

    /// The 65C02 derives N and Z from the decimal result.
    #[test]
    fn prop_cmos_decimal_flags_follow_result(
        opcode in prop::sample::select(vec![0x69u8, 0xE9]),
        a in any::<u8>(),
        operand in any::<u8>(),
        carry_in in any::<bool>(),
    ) {
        let mut cpu = setup_cpu(ChipVariant::Cmos65C02);
        cpu.set_a(a);
        cpu.set_flag_c(carry_in);
        cpu.set_flag_d(true);
        cpu.memory_mut().load(0x8000, &[opcode, operand]);

        prop_assert_eq!(cpu.step().unwrap(), 3);
        prop_assert_eq!(cpu.flag_z(), cpu.a() == 0);
        prop_assert_eq!(cpu.flag_n(), cpu.a() & 0x80 != 0);
    }

    /// Valid BCD operands add like decimal numbers.
    #[test]
    fn prop_decimal_adc_valid_bcd(
        variant in variant_strategy(),
        a in 0u8..100,
        operand in 0u8..100,
        carry_in in any::<bool>(),
    ) {
        let to_bcd = |n: u8| ((n / 10) << 4) | (n % 10);
        let mut cpu = setup_cpu(variant);
        cpu.set_a(to_bcd(a));
        cpu.set_flag_c(carry_in);
        cpu.set_flag_d(true);
        cpu.memory_mut().load(0x8000, &[0x69, to_bcd(operand)]);

        cpu.step().unwrap();

        let sum = a as u16 + operand as u16 + carry_in as u16;
        prop_assert_eq!(cpu.a(), to_bcd((sum % 100) as u8));
        prop_assert_eq!(cpu.flag_c(), sum >= 100);
    }
}

// ========== Timing and PC ==========

proptest! {
    /// Straight-line instructions advance PC by their size.
    #[test]
    fn prop_pc_advances_by_instruction_size(
        variant in variant_strategy(),
        index in any::<prop::sample::Index>(),
        operand1 in any::<u8>(),
        operand2 in any::<u8>(),
    ) {
        let opcodes = straight_line_opcodes(variant);
        let opcode = opcodes[index.index(opcodes.len())];
        let def = &opcode_table(variant)[opcode];

        let mut cpu = setup_cpu(variant);
        cpu.memory_mut().load(0x8000, &[opcode, operand1, operand2]);

        cpu.step().unwrap();

        prop_assert_eq!(
            cpu.pc(),
            0x8000 + def.size_bytes as u16,
            "${:02X} {} on {}",
            opcode,
            def.mnemonic,
            variant
        );
    }

    /// Executed instructions never take fewer cycles than the table says.
    #[test]
    fn prop_cycles_at_least_base(
        variant in variant_strategy(),
        opcode in any::<u8>(),
        operand1 in any::<u8>(),
        operand2 in any::<u8>(),
    ) {
        let def = &opcode_table(variant)[opcode];
        let mut cpu = setup_cpu(variant);
        cpu.memory_mut().load(0x8000, &[opcode, operand1, operand2]);

        if let Ok(cycles) = cpu.step() {
            prop_assert!(cycles >= def.base_cycles as u32, "${:02X} {}", opcode, def.mnemonic);
            prop_assert_eq!(cpu.cycles(), cycles as u64);
        }
    }

    /// Indexed reads pay one extra cycle exactly when the page changes.
    #[test]
    fn prop_absolute_x_page_cross_penalty(
        variant in variant_strategy(),
        base in any::<u16>(),
        x in any::<u8>(),
    ) {
        let mut cpu = setup_cpu(variant);
        cpu.set_x(x);
        let [lo, hi] = base.to_le_bytes();
        cpu.memory_mut().load(0x8000, &[0xBD, lo, hi]);

        let crossed = (base & 0xFF00) != (base.wrapping_add(x as u16) & 0xFF00);
        prop_assert_eq!(cpu.step().unwrap(), 4 + crossed as u32);
    }
}
