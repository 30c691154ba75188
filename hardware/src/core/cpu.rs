//! CPU Driver.
//!
//! [`Cpu`] owns all processor state and clocks the pipeline. Each call to
//! [`Cpu::tick`] is one clock cycle: the stages run from Writeback back to
//! Fetch, each reading latch values from the end of the previous cycle and
//! writing the latch in front of it, while the forward, hazard, and status
//! buses are rebuilt for the cycle.

use std::io::{self, Write};
use std::path::Path;

use log::{info, log_enabled, trace, Level};

use crate::common::error::{LoadError, SimError, Status};
use crate::config::Config;
use crate::core::arch::cc::ConditionCodes;
use crate::core::arch::gpr::Gpr;
use crate::core::memory::Memory;
use crate::core::pipeline::hazards;
use crate::core::pipeline::latches::Latches;
use crate::core::pipeline::signals::{ForwardBus, HazardBus, StatusBus};
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage, WritebackOutcome,
};
use crate::core::pipeline::traits::PipelineLatch;
use crate::isa::Instruction;
use crate::sim::dump::{self, DumpFlags};
use crate::sim::loader::{self, LoadSummary};
use crate::stats::SimStats;

/// Instructions in D and E discarded when a jump turns out not taken.
const SQUASHED_PER_MISPREDICTION: u64 = 2;

/// Pipelined Y86 processor.
pub struct Cpu {
    /// Main memory.
    pub mem: Memory,
    /// Program registers.
    pub regs: Gpr,
    /// Condition codes.
    pub cc: ConditionCodes,
    /// The five pipeline latches.
    pub latches: Latches,
    /// Performance counters.
    pub stats: SimStats,
    max_cycles: u64,
    terminal: Option<Status>,
    out: Box<dyn Write>,
}

impl Cpu {
    /// Creates a CPU with cleared state, sized and limited by `config`.
    ///
    /// Diagnostics go to standard output unless redirected with
    /// [`Cpu::with_output`].
    pub fn new(config: &Config) -> Self {
        Self {
            mem: Memory::new(config.memory.size),
            regs: Gpr::new(),
            cc: ConditionCodes::default(),
            latches: Latches::default(),
            stats: SimStats::default(),
            max_cycles: config.general.max_cycles,
            terminal: None,
            out: Box::new(io::stdout()),
        }
    }

    /// Redirects dump and fault diagnostics.
    pub fn with_output(mut self, out: Box<dyn Write>) -> Self {
        self.out = out;
        self
    }

    /// Clears memory, registers, condition codes, latches, and counters.
    pub fn reset(&mut self) {
        self.mem.clear();
        self.regs.clear();
        self.cc.clear();
        self.latches.clear();
        self.stats = SimStats::default();
        self.terminal = None;
    }

    /// Loads a `.yo` listing into memory.
    pub fn load_program(&mut self, path: impl AsRef<Path>) -> Result<LoadSummary, LoadError> {
        loader::load_file(path, &mut self.mem)
    }

    /// Status that ended the run, once Writeback has reported one.
    pub fn terminal_status(&self) -> Option<Status> {
        self.terminal
    }

    /// Simulates one clock cycle.
    ///
    /// # Returns
    ///
    /// `Some(status)` once the instruction in Writeback carries a non-normal
    /// status, `None` while the program is still running. Ticking a
    /// terminated CPU does nothing and returns the same status.
    pub fn tick(&mut self) -> Result<Option<Status>, SimError> {
        if let Some(stat) = self.terminal {
            return Ok(Some(stat));
        }

        self.stats.cycles += 1;
        if log_enabled!(Level::Trace) {
            self.print_pipeline_diagram();
        }

        let mut fwd = ForwardBus::default();
        let mut hazard = HazardBus::default();
        let mut status = StatusBus::default();

        let outcome = wb_stage(&self.latches.w, &mut self.regs, &mut fwd, &mut status);

        if outcome.stat.is_ok() && !self.latches.w.is_empty() {
            self.stats.record_retired(self.latches.w.inst);
        }
        // Diagnostics see the state right after Writeback; a failing sink is
        // reported only once the cycle has finished.
        let report = self.report_writeback(outcome);

        mem_stage(
            &self.latches.m,
            &mut self.latches.w,
            &mut self.mem,
            &mut fwd,
            &mut hazard,
            &mut status,
        );
        execute_stage(
            &self.latches.e,
            &mut self.latches.m,
            &mut self.cc,
            &status,
            &mut fwd,
            &mut hazard,
        );
        decode_stage(
            &self.latches.d,
            &mut self.latches.e,
            &self.regs,
            &fwd,
            &mut hazard,
        );
        self.record_hazards(&hazard, &status);
        fetch_stage(
            &mut self.latches.f,
            &mut self.latches.d,
            &self.mem,
            &fwd,
            &hazard,
        );

        if outcome.terminated() {
            info!(
                "terminated with {} after {} cycles",
                outcome.stat, self.stats.cycles
            );
            self.terminal = Some(outcome.stat);
        }
        report?;
        Ok(self.terminal)
    }

    /// Prints what the instruction leaving Writeback asks for: a `dump`
    /// selection, or the fault message and full dump of `ADR`/`INS`.
    fn report_writeback(&mut self, outcome: WritebackOutcome) -> io::Result<()> {
        if outcome.dump != 0 {
            self.dump_state(DumpFlags::from_mask(outcome.dump))?;
        }
        let message = match outcome.stat {
            Status::Aok | Status::Hlt => return Ok(()),
            Status::Adr => "Invalid memory address",
            Status::Ins => "Invalid instruction",
        };
        writeln!(self.out, "{}", message)?;
        self.dump_state(DumpFlags::ALL)
    }

    /// Runs until Writeback reports termination.
    ///
    /// # Returns
    ///
    /// The terminal status, or [`SimError::CycleLimit`] if the configured
    /// cycle budget runs out first.
    pub fn run(&mut self) -> Result<Status, SimError> {
        loop {
            if self.max_cycles != 0 && self.stats.cycles >= self.max_cycles {
                return Err(SimError::CycleLimit(self.max_cycles));
            }
            if let Some(stat) = self.tick()? {
                return Ok(stat);
            }
        }
    }

    /// Writes the selected dumps to the diagnostic sink.
    pub fn dump_state(&mut self, flags: DumpFlags) -> io::Result<()> {
        dump::dump_state(
            self.out.as_mut(),
            flags,
            &self.regs,
            &self.cc,
            &self.latches,
            &self.mem,
        )
    }

    /// Counts this cycle's hazards. Instructions behind a halting or
    /// faulting one never retire, so nothing is counted for them.
    fn record_hazards(&mut self, hazard: &HazardBus, status: &StatusBus) {
        if status.downstream_fault() {
            return;
        }
        if hazards::load_use_hazard(hazard) {
            self.stats.stalls_load_use += 1;
        } else if hazards::return_in_flight(hazard) {
            self.stats.stalls_return += 1;
        }
        if matches!(hazard.e_inst, Instruction::Jump(_)) {
            self.stats.branch_predictions += 1;
            if hazards::mispredicted_branch(hazard) {
                self.stats.branch_mispredictions += 1;
                self.stats.bubbles_misprediction += SQUASHED_PER_MISPREDICTION;
            }
        }
    }

    fn print_pipeline_diagram(&self) {
        let l = &self.latches;
        trace!(
            "cycle {:>4}  F:{:#05x} -> D:{} -> E:{} -> M:{} -> W:{}",
            self.stats.cycles,
            l.f.pred_pc,
            l.d.inst,
            l.e.inst,
            l.m.inst,
            l.w.inst
        );
    }
}
