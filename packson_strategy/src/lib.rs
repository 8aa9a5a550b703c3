use packson::prelude::*;
use proptest::prelude::*;

/// arbitrary finite double for use with proptest
pub fn arb_double() -> impl Strategy<Value = f64> {
    any::<f64>().prop_filter("only finite doubles are encodable", |f| f.is_finite())
}

/// arbitrary map key for use with proptest
pub fn arb_key() -> impl Strategy<Value = String> {
    ".{0,12}".prop_map(|s| s)
}

/// arbitrary packson Value for use with proptest
pub fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Undef),
        Just(Value::Null),
        // misc
        any::<bool>().prop_map(Value::from),
        any::<String>().prop_map(Value::from),
        // integers
        // 8-bit
        any::<u8>().prop_map(Value::from),
        any::<i8>().prop_map(Value::from),
        // 16-bit
        any::<u16>().prop_map(Value::from),
        any::<i16>().prop_map(Value::from),
        // 32-bit
        any::<u32>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        // 64-bit
        any::<i64>().prop_map(Value::from),
        // floats
        any::<f32>().prop_filter("only finite doubles are encodable", |f| f.is_finite())
            .prop_map(Value::from),
        arb_double().prop_map(Value::from),
    ];
    leaf.prop_recursive(
        8,  // max depth
        64, // max nodes
        10, // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..10).prop_map(Value::from),
                prop::collection::btree_map(arb_key(), inner, 0..10)
                    .prop_map(|m| Value::from(VecMap::from(m)))
            ]
        },
    )
}
