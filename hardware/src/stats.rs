//! Simulation statistics collection and reporting.
//!
//! Tracks cycle and instruction counts, pipeline stall and bubble counts,
//! branch prediction accuracy, the retired instruction mix, and host
//! execution time.

use std::io::{self, Write};
use std::time::Instant;

use serde::Serialize;

use crate::isa::Instruction;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug, Serialize)]
pub struct SimStats {
    #[serde(skip)]
    start_time: Instant,
    /// Clock cycles simulated.
    pub cycles: u64,
    /// Non-bubble instructions that reached Writeback with normal status.
    pub instructions_retired: u64,

    /// `OPl`, `irmovl`, `rrmovl`/`cmovXX`.
    pub inst_alu: u64,
    /// `mrmovl`.
    pub inst_load: u64,
    /// `rmmovl`.
    pub inst_store: u64,
    /// `jXX`, `call`, `ret`.
    pub inst_branch: u64,
    /// `pushl`, `popl`.
    pub inst_stack: u64,
    /// `nop`, `dump`.
    pub inst_other: u64,

    /// Conditional and unconditional jumps resolved in Execute.
    pub branch_predictions: u64,
    /// Jumps predicted taken that were not taken.
    pub branch_mispredictions: u64,

    /// Cycles Fetch and Decode were frozen by a load-use hazard.
    pub stalls_load_use: u64,
    /// Cycles Fetch was frozen waiting for a return address.
    pub stalls_return: u64,
    /// Wrongly fetched instructions squashed by mispredicted jumps.
    pub bubbles_misprediction: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            inst_alu: 0,
            inst_load: 0,
            inst_store: 0,
            inst_branch: 0,
            inst_stack: 0,
            inst_other: 0,
            branch_predictions: 0,
            branch_mispredictions: 0,
            stalls_load_use: 0,
            stalls_return: 0,
            bubbles_misprediction: 0,
        }
    }
}

impl SimStats {
    /// Records an instruction leaving Writeback with normal status.
    pub fn record_retired(&mut self, inst: Instruction) {
        self.instructions_retired += 1;
        match inst {
            Instruction::Op(_) | Instruction::Irmov | Instruction::Cmov(_) => self.inst_alu += 1,
            Instruction::Mrmov => self.inst_load += 1,
            Instruction::Rmmov => self.inst_store += 1,
            Instruction::Jump(_) | Instruction::Call | Instruction::Ret => self.inst_branch += 1,
            Instruction::Push | Instruction::Pop => self.inst_stack += 1,
            Instruction::Halt | Instruction::Nop | Instruction::Dump => self.inst_other += 1,
        }
    }

    /// Serializes the counters as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Prints a formatted summary of all simulation statistics.
    pub fn print(&self, out: &mut dyn Write) -> io::Result<()> {
        let seconds = self.start_time.elapsed().as_secs_f64();

        let cyc = self.cycles.max(1);
        let instr = self.instructions_retired.max(1);

        let ipc = self.instructions_retired as f64 / cyc as f64;
        let cpi = cyc as f64 / instr as f64;
        let pct = |n: u64, of: u64| (n as f64 / of as f64) * 100.0;

        writeln!(out, "\n==========================================================")?;
        writeln!(out, "Y86 PIPELINE SIMULATION STATISTICS")?;
        writeln!(out, "==========================================================")?;
        writeln!(out, "host_seconds             {:.4} s", seconds)?;
        writeln!(out, "sim_cycles               {}", self.cycles)?;
        writeln!(out, "sim_insts                {}", self.instructions_retired)?;
        writeln!(out, "sim_ipc                  {:.4}", ipc)?;
        writeln!(out, "sim_cpi                  {:.4}", cpi)?;
        writeln!(out, "----------------------------------------------------------")?;
        writeln!(out, "PIPELINE HAZARDS")?;
        writeln!(
            out,
            "  stalls.load_use        {} ({:.2}%)",
            self.stalls_load_use,
            pct(self.stalls_load_use, cyc)
        )?;
        writeln!(
            out,
            "  stalls.return          {} ({:.2}%)",
            self.stalls_return,
            pct(self.stalls_return, cyc)
        )?;
        writeln!(
            out,
            "  bubbles.mispredict     {} ({:.2}%)",
            self.bubbles_misprediction,
            pct(self.bubbles_misprediction, cyc)
        )?;
        writeln!(out, "----------------------------------------------------------")?;
        writeln!(out, "INSTRUCTION MIX")?;
        for (name, count) in [
            ("op.alu", self.inst_alu),
            ("op.load", self.inst_load),
            ("op.store", self.inst_store),
            ("op.branch", self.inst_branch),
            ("op.stack", self.inst_stack),
            ("op.other", self.inst_other),
        ] {
            writeln!(out, "  {:<22} {} ({:.2}%)", name, count, pct(count, instr))?;
        }
        writeln!(out, "----------------------------------------------------------")?;
        writeln!(out, "BRANCH PREDICTION")?;
        let bp_total = self.branch_predictions;
        let bp_miss = self.branch_mispredictions;
        let bp_acc = if bp_total > 0 {
            100.0 - pct(bp_miss, bp_total)
        } else {
            0.0
        };
        writeln!(out, "  bp.lookups             {}", bp_total)?;
        writeln!(out, "  bp.mispredicts         {}", bp_miss)?;
        writeln!(out, "  bp.accuracy            {:.2}%", bp_acc)?;
        writeln!(out, "==========================================================")
    }
}
