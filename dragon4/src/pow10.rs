// POW10_U32[x] is 10**x for the low three bits of a power-of-ten exponent.
pub(crate) static POW10_U32: [u32; 8] = {
    let mut pow10 = [1u32; 8];
    let mut x = 1;
    while x < pow10.len() {
        pow10[x] = 10 * pow10[x - 1];
        x += 1;
    }
    pow10
};

// POW10_BIG[i] is 10**(8 * 2**i) as base 2**32 blocks, least significant
// first. Exponents up to 511 are reachable by combining one entry of
// POW10_U32 with any subset of these.
#[rustfmt::skip]
pub(crate) static POW10_BIG: [&[u32]; 6] = [
    // 10**8
    &[0x05f5e100],
    // 10**16
    &[0x6fc10000, 0x002386f2],
    // 10**32
    &[0x00000000, 0x85acef81, 0x2d6d415b, 0x000004ee],
    // 10**64
    &[
        0x00000000, 0x00000000, 0xbf6a1f01, 0x6e38ed64, 0xdaa797ed, 0xe93ff9f4,
        0x00184f03,
    ],
    // 10**128
    &[
        0x00000000, 0x00000000, 0x00000000, 0x00000000, 0x2e953e01, 0x03df9909,
        0x0f1538fd, 0x2374e42f, 0xd3cff5ec, 0xc404dc08, 0xbccdb0da, 0xa6337f19,
        0xe91f2603, 0x0000024e,
    ],
    // 10**256
    &[
        0x00000000, 0x00000000, 0x00000000, 0x00000000, 0x00000000, 0x00000000,
        0x00000000, 0x00000000, 0x982e7c01, 0xbed3875b, 0xd8d99f72, 0x12152f87,
        0x6bde50c6, 0xcf4a6e70, 0xd595d80f, 0x26b2716e, 0xadc666b0, 0x1d153624,
        0x3c42d35a, 0x63ff540e, 0xcc5573c0, 0x65f9ef17, 0x55bc28f2, 0x80dcc7f7,
        0xf46eeddc, 0x5fdcefce, 0x000553f7,
    ],
];
