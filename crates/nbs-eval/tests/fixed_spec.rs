use nbs_core::{AdjacencyMatrix, Op, FIXED_BRIDGE_OP};
use nbs_eval::{Canonicalizer, FixedSpec, UpscaleToFixedFormat};

fn fixed(edges: &[(usize, usize)], inner: [Op; 4]) -> FixedSpec {
    let mut matrix = AdjacencyMatrix::empty_cell();
    for &(from, to) in edges {
        matrix.set_edge(from, to).unwrap();
    }
    let mut ops = vec![Op::Input];
    ops.extend_from_slice(&inner);
    ops.push(Op::Output);
    UpscaleToFixedFormat.canonicalize(&matrix, &ops).unwrap()
}

const DIAMOND: [(usize, usize); 4] = [(0, 1), (0, 2), (1, 5), (2, 5)];

#[test]
fn canonical_cells_pass_validation() {
    let spec = fixed(&DIAMOND, [Op::Conv3x3BnRelu; 4]);
    spec.validate().unwrap();
    assert_eq!(spec.matrix.dim(), 7);
    assert_eq!(spec.ops[5], FIXED_BRIDGE_OP);
}

#[test]
fn pruning_drops_the_bridge_and_dangling_nodes() {
    let spec = fixed(&DIAMOND, [Op::Conv3x3BnRelu; 4]);
    let pruned = spec.prune().unwrap();
    assert_eq!(pruned.matrix.dim(), 4);
    assert_eq!(
        pruned.ops,
        vec![Op::Input, Op::Conv3x3BnRelu, Op::Conv3x3BnRelu, Op::Output]
    );
    assert_eq!(pruned.matrix.edge_count(), 4);
    assert!(pruned.matrix.has_edge(1, 3));
}

#[test]
fn disconnected_cells_cannot_be_pruned() {
    let spec = fixed(&[(0, 1), (1, 2)], [Op::MaxPool3x3; 4]);
    assert_eq!(spec.prune().unwrap_err().code(), "disconnected-cell");
    assert_eq!(spec.fingerprint().unwrap_err().code(), "disconnected-cell");
}

#[test]
fn fingerprint_ignores_node_numbering() {
    let a = fixed(
        &DIAMOND,
        [Op::Conv3x3BnRelu, Op::MaxPool3x3, Op::Conv1x1BnRelu, Op::Conv1x1BnRelu],
    );
    let b = fixed(
        &DIAMOND,
        [Op::MaxPool3x3, Op::Conv3x3BnRelu, Op::MaxPool3x3, Op::MaxPool3x3],
    );
    assert_eq!(a.fingerprint().unwrap(), b.fingerprint().unwrap());
}

#[test]
fn fingerprint_ignores_unused_nodes() {
    let chain = fixed(&[(0, 1), (1, 5)], [Op::Conv3x3BnRelu; 4]);
    let with_loose_end = fixed(&[(0, 1), (1, 5), (1, 3)], [Op::Conv3x3BnRelu; 4]);
    assert_eq!(
        chain.fingerprint().unwrap(),
        with_loose_end.fingerprint().unwrap()
    );
}

#[test]
fn fingerprint_separates_different_cells() {
    let conv = fixed(&DIAMOND, [Op::Conv3x3BnRelu; 4]);
    let pool = fixed(&DIAMOND, [Op::MaxPool3x3; 4]);
    let chain = fixed(&[(0, 1), (1, 2), (2, 5)], [Op::Conv3x3BnRelu; 4]);
    let fingerprints = [
        conv.fingerprint().unwrap(),
        pool.fingerprint().unwrap(),
        chain.fingerprint().unwrap(),
    ];
    assert_ne!(fingerprints[0], fingerprints[1]);
    assert_ne!(fingerprints[0], fingerprints[2]);
    assert_ne!(fingerprints[1], fingerprints[2]);
    assert_eq!(fingerprints[0].len(), 64);
}

#[test]
fn validation_reports_format_violations() {
    let mut spec = fixed(&DIAMOND, [Op::Conv3x3BnRelu; 4]);
    spec.ops.pop();
    assert_eq!(spec.validate().unwrap_err().code(), "ops-length-mismatch");

    let mut spec = fixed(&DIAMOND, [Op::Conv3x3BnRelu; 4]);
    spec.ops.swap(0, 6);
    assert_eq!(spec.validate().unwrap_err().code(), "misplaced-io-op");

    let mut spec = fixed(&DIAMOND, [Op::Conv3x3BnRelu; 4]);
    spec.ops[2] = Op::Output;
    let err = spec.validate().unwrap_err();
    assert_eq!(err.code(), "invalid-op");
    assert_eq!(err.context("node"), Some("2"));

    let mut matrix = AdjacencyMatrix::new(8).unwrap();
    matrix.set_edge(0, 7).unwrap();
    let mut ops = vec![Op::Input];
    ops.extend([Op::Conv3x3BnRelu; 6]);
    ops.push(Op::Output);
    let err = FixedSpec::new(matrix, ops).validate().unwrap_err();
    assert_eq!(err.code(), "format-size-mismatch");
}

#[test]
fn short_op_lists_are_rejected_before_hashing() {
    let mut chain = AdjacencyMatrix::new(3).unwrap();
    chain.set_edge(0, 1).unwrap();
    chain.set_edge(1, 2).unwrap();
    let spec = FixedSpec::new(chain, vec![Op::Input, Op::Output]);
    assert_eq!(spec.prune().unwrap_err().code(), "ops-length-mismatch");
    assert_eq!(spec.fingerprint().unwrap_err().code(), "ops-length-mismatch");

    let json = r#"{"matrix":[[0,1,0],[0,0,1],[0,0,0]],"ops":["input","output"]}"#;
    let decoded: FixedSpec = serde_json::from_str(json).unwrap();
    assert_eq!(decoded, spec);
    assert_eq!(decoded.fingerprint().unwrap_err().code(), "ops-length-mismatch");
}
