//! Hand-placed register/stack transfer for RV32.

use tee_app_abi::Word;

/// Call `entry` with the first nine words of `argv`.
///
/// Words 0..8 go to `a0`..`a7`, word 8 to `0(sp)` of a 16-byte aligned
/// outgoing area. The callee's `a0` is returned.
///
/// # Safety
/// `entry` must be a function following the standard calling convention
/// and `argv` must point to at least nine readable words.
#[unsafe(naked)]
pub unsafe extern "C" fn service_trampoline(entry: usize, argv: *const Word) -> Word {
    core::arch::naked_asm!(
        "addi sp, sp, -16",
        "sw ra, 12(sp)",
        "sw s0, 8(sp)",
        "mv s0, sp",
        // Outgoing stack argument area, kept 16-byte aligned.
        "addi sp, sp, -16",
        "mv t0, a0",
        "mv t1, a1",
        "lw t2, 32(t1)",
        "sw t2, 0(sp)",
        "lw a0, 0(t1)",
        "lw a1, 4(t1)",
        "lw a2, 8(t1)",
        "lw a3, 12(t1)",
        "lw a4, 16(t1)",
        "lw a5, 20(t1)",
        "lw a6, 24(t1)",
        "lw a7, 28(t1)",
        "jalr t0",
        "mv sp, s0",
        "lw s0, 8(sp)",
        "lw ra, 12(sp)",
        "addi sp, sp, 16",
        "ret",
    )
}
