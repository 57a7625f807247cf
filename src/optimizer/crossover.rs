use super::mutation::SlotClasses;
use fastrand::Rng;

/// Partially Mapped Crossover over `[c0, c1)`.
///
/// The child copies `p0` inside the segment. Outside it takes `p1`'s symbol,
/// following the `p0 -> p1` mapping while that symbol is already inside the
/// segment. Both parents must be permutations of the same ids.
pub fn pmx(p0: &[usize], p1: &[usize], c0: usize, c1: usize) -> Vec<usize> {
    let n = p0.len();
    assert_eq!(n, p1.len(), "Parents must have same length");
    assert!(c0 <= c1 && c1 <= n, "Invalid cut points {}..{}", c0, c1);

    let mut pos_in_p0 = vec![0; n];
    for (i, &s) in p0.iter().enumerate() {
        pos_in_p0[s] = i;
    }
    let mut in_segment = vec![false; n];
    for &s in &p0[c0..c1] {
        in_segment[s] = true;
    }

    let segment_len = c1 - c0;
    let mut child = p1.to_vec();
    child[c0..c1].copy_from_slice(&p0[c0..c1]);

    for i in (0..c0).chain(c1..n) {
        let mut symbol = p1[i];
        let mut hops = 0;
        'remap: loop {
            if !in_segment[symbol] {
                break 'remap;
            }
            assert!(
                hops <= segment_len,
                "PMX remap chain left the segment after {} hops",
                hops
            );
            symbol = p1[pos_in_p0[symbol]];
            hops += 1;
        }
        child[i] = symbol;
    }

    child
}

/// Two PMX children with cut points drawn like a mutation swap pair.
pub fn crossover(
    p0: &[usize],
    p1: &[usize],
    classes: &SlotClasses,
    rng: &mut Rng,
) -> (Vec<usize>, Vec<usize>) {
    let (a, b) = classes.sample_pair(rng);
    let (c0, c1) = if a <= b { (a, b) } else { (b, a) };
    (pmx(p0, p1, c0, c1), pmx(p1, p0, c0, c1))
}
