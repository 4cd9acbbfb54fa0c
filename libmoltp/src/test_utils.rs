/// Prove the macro's formula argument and assert that the derivation
/// trace renders exactly as the expected lines, in order.
#[macro_export]
macro_rules! assert_trace {
    ($formula:expr, $expected:expr) => {{
        let raw = $crate::RawFormula {
            oid: 0,
            formula: ($formula).to_owned(),
        };
        let solution = $crate::prove(&raw).expect("formula proves");

        let got: Vec<String> = solution.iter().map(ToString::to_string).collect();
        ::pretty_assertions::assert_eq!(got, $expected);

        solution
    }};
}
