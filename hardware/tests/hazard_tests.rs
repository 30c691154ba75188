//! Tests for hazard detection, latch control, and PC selection.

use rstest::rstest;
use yess::common::error::Status;
use yess::core::pipeline::hazards::*;
use yess::core::pipeline::signals::{ForwardBus, HazardBus, LatchControl, StatusBus};
use yess::isa::abi::*;
use yess::isa::{Cond, Instruction};

/// Creates a hazard bus with a load of `dstm` in Execute and the given
/// Decode sources.
fn create_load_hazard(load: Instruction, dstm: u8, srca: u8, srcb: u8) -> HazardBus {
    HazardBus {
        d_srca: srca,
        d_srcb: srcb,
        e_inst: load,
        e_dstm: dstm,
        ..HazardBus::default()
    }
}

/// Tests load-use detection for both load instructions and both sources.
#[rstest]
#[case(Instruction::Mrmov, REG_EAX, REG_EAX, RNONE, true)]
#[case(Instruction::Mrmov, REG_EAX, RNONE, REG_EAX, true)]
#[case(Instruction::Pop, REG_EBX, REG_EBX, REG_ESP, true)]
#[case(Instruction::Mrmov, REG_EAX, REG_ECX, REG_EDX, false)]
#[case(Instruction::Irmov, RNONE, REG_EAX, REG_EAX, false)]
#[case(Instruction::Mrmov, RNONE, RNONE, RNONE, false)]
fn test_load_use_hazard(
    #[case] load: Instruction,
    #[case] dstm: u8,
    #[case] srca: u8,
    #[case] srcb: u8,
    #[case] expected: bool,
) {
    assert_eq!(
        load_use_hazard(&create_load_hazard(load, dstm, srca, srcb)),
        expected
    );
}

/// Tests that load-use stalls F and D and bubbles E.
#[test]
fn test_load_use_controls() {
    let h = create_load_hazard(Instruction::Mrmov, REG_EAX, REG_EAX, RNONE);
    assert_eq!(fetch_control(&h), LatchControl::Stall);
    assert_eq!(decode_control(&h), LatchControl::Stall);
    assert_eq!(execute_control(&h), LatchControl::Bubble);
}

/// Tests that a not-taken jump in Execute bubbles D and E.
#[test]
fn test_misprediction_controls() {
    let h = HazardBus {
        e_inst: Instruction::Jump(Cond::Ne),
        e_cnd: false,
        ..HazardBus::default()
    };
    assert!(mispredicted_branch(&h));
    assert_eq!(fetch_control(&h), LatchControl::Normal);
    assert_eq!(decode_control(&h), LatchControl::Bubble);
    assert_eq!(execute_control(&h), LatchControl::Bubble);

    let taken = HazardBus { e_cnd: true, ..h };
    assert!(!mispredicted_branch(&taken));
    assert_eq!(decode_control(&taken), LatchControl::Normal);
}

/// Tests that a ret anywhere from Decode to Memory stalls F and bubbles D.
#[rstest]
#[case::in_decode(HazardBus { d_inst: Instruction::Ret, ..HazardBus::default() })]
#[case::in_execute(HazardBus { e_inst: Instruction::Ret, ..HazardBus::default() })]
#[case::in_memory(HazardBus { m_inst: Instruction::Ret, ..HazardBus::default() })]
fn test_return_controls(#[case] h: HazardBus) {
    assert!(return_in_flight(&h));
    assert_eq!(fetch_control(&h), LatchControl::Stall);
    assert_eq!(decode_control(&h), LatchControl::Bubble);
    assert_eq!(execute_control(&h), LatchControl::Normal);
}

/// Tests that load-use wins over a draining ret for the D latch.
#[test]
fn test_load_use_over_return() {
    let h = HazardBus {
        d_inst: Instruction::Ret,
        d_srca: REG_ESP,
        d_srcb: REG_ESP,
        e_inst: Instruction::Pop,
        e_dstm: REG_ESP,
        ..HazardBus::default()
    };
    assert_eq!(fetch_control(&h), LatchControl::Stall);
    assert_eq!(decode_control(&h), LatchControl::Stall);
    assert_eq!(execute_control(&h), LatchControl::Bubble);
}

/// Tests the downstream status controls for M and W.
#[rstest]
#[case(Status::Aok, Status::Aok, LatchControl::Normal, LatchControl::Normal)]
#[case(Status::Adr, Status::Aok, LatchControl::Bubble, LatchControl::Normal)]
#[case(Status::Aok, Status::Hlt, LatchControl::Bubble, LatchControl::Stall)]
#[case(Status::Ins, Status::Ins, LatchControl::Bubble, LatchControl::Stall)]
fn test_status_controls(
    #[case] m_stat: Status,
    #[case] w_stat: Status,
    #[case] m: LatchControl,
    #[case] w: LatchControl,
) {
    let status = StatusBus { m_stat, w_stat };
    assert_eq!(memory_control(&status), m);
    assert_eq!(writeback_control(&status), w);
}

/// Tests fetch address selection priority.
#[test]
fn test_select_pc() {
    let mut fwd = ForwardBus::default();
    assert_eq!(select_pc(0x40, &fwd), 0x40);

    fwd.w_inst = Instruction::Ret;
    fwd.w_valm = 0x80;
    assert_eq!(select_pc(0x40, &fwd), 0x80);

    fwd.m_inst = Instruction::Jump(Cond::L);
    fwd.m_cnd = false;
    fwd.m_vala = 0x20;
    assert_eq!(select_pc(0x40, &fwd), 0x20);

    fwd.m_cnd = true;
    assert_eq!(select_pc(0x40, &fwd), 0x80);
}
