//! Proptest generators for property-based testing.

use proptest::prelude::*;

use genesis_claims_core::{Address, ClaimBuilder, ClaimDescriptor, GenesisClaim, Keypair};

/// Generate a random keypair. Seeds outside the scalar range are skipped.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_filter_map("seed is not a valid scalar", |seed| {
        Keypair::from_secret_bytes(&seed).ok()
    })
}

/// Generate a random Address.
pub fn address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::from_bytes)
}

/// Generate an amount, biased toward the encoding boundaries.
pub fn amount() -> impl Strategy<Value = u64> {
    prop_oneof![
        Just(0u64),
        Just(23u64),
        Just(24u64),
        Just(u64::from(u32::MAX)),
        Just(u64::MAX),
        any::<u64>(),
    ]
}

/// Generate a recovery id, including out-of-range values.
pub fn recovery_id() -> impl Strategy<Value = u32> {
    prop_oneof![0u32..4, any::<u32>()]
}

/// Generate signature bytes of arbitrary length.
pub fn signature_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        prop::collection::vec(any::<u8>(), 64),
        prop::collection::vec(any::<u8>(), 0..=96),
    ]
}

/// Generate a complete descriptor with arbitrary (unsigned) contents.
pub fn descriptor() -> impl Strategy<Value = ClaimDescriptor> {
    (address(), amount(), signature_bytes(), recovery_id()).prop_map(|(to, amount, sig, rec)| {
        ClaimDescriptor::new(to, amount)
            .with_signature(sig)
            .with_recovery(rec)
    })
}

/// Parameters for generating a signed claim.
#[derive(Debug, Clone)]
pub struct ClaimParams {
    pub keypair: Keypair,
    pub amount: u64,
}

impl Arbitrary for ClaimParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (keypair(), amount())
            .prop_map(|(keypair, amount)| ClaimParams { keypair, amount })
            .boxed()
    }
}

/// Generate a claim, signed by the params' keypair for its own address.
pub fn claim_from_params(params: &ClaimParams) -> GenesisClaim {
    ClaimBuilder::new(params.keypair.address(), params.amount)
        .sign(&params.keypair)
        .expect("signing with a valid key succeeds")
}
