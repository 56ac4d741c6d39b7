use bitvec::prelude::*;

/// Moves bits of `data` according to `p_block`.
///
/// Entry `i` of the table is the 1-indexed source position of output bit `i`.
/// Bits are addressed most significant first inside each byte, and the output
/// holds `p_block.len()` bits packed into whole bytes (trailing bits zero).
pub fn permute(data: &[u8], p_block: &[usize]) -> Vec<u8> {
    let source = data.view_bits::<Msb0>();
    let mut permuted = bitvec![u8, Msb0; 0; p_block.len()];

    for (i, &pos) in p_block.iter().enumerate() {
        assert!(
            (1..=source.len()).contains(&pos),
            "permutation entry {} out of range for {}-bit input",
            pos,
            source.len()
        );
        permuted.set(i, source[pos - 1]);
    }

    permuted.into_vec()
}

pub fn xor_bytes(a: &[u8], b: &[u8]) -> Vec<u8> {
    assert_eq!(a.len(), b.len(), "xor operands must have equal length");
    a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect()
}
