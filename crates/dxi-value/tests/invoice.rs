//! Validator and diagnostics over a realistic multi-definition schema.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use dxi_schema::{lookup_name, Case, Field, Module, Name, ShapeTag, Type, TypeExpr};
use dxi_value::{
    check_base_value, check_value, double, find_mismatch, int, string, BaseValue, MismatchKind,
    Value,
};

fn name(s: &str) -> Name {
    Name::parse(s).unwrap()
}

/// ```text
/// billing.Status  = Draft | Issued | Paid
/// billing.Amount  = Newtype Float64
/// billing.Line    = { sku: String, qty: Int32, price: Amount }
/// billing.Payment = Cash | Card(last4: String) | Transfer(iban: String, ref: Optional String)
/// billing.Invoice = { number: String, issued: Date, status: Status,
///                     lines: [Line], tags: {String}, payment: Optional Payment }
/// ```
fn billing() -> Arc<Module> {
    let r = |s: &str| TypeExpr::reference(name(s));
    Module::builder()
        .define_named(
            TypeExpr::enumeration(name("billing.Status"), ["Draft", "Issued", "Paid"]).unwrap(),
        )
        .define_named(TypeExpr::newtype(name("billing.Amount"), TypeExpr::Float64))
        .define_named(
            TypeExpr::record(
                name("billing.Line"),
                vec![
                    Field::new("sku", TypeExpr::String),
                    Field::new("qty", TypeExpr::Int32),
                    Field::new("price", r("billing.Amount")),
                ],
            )
            .unwrap(),
        )
        .define_named(
            TypeExpr::variant(
                name("billing.Payment"),
                vec![
                    Case::unit("Cash"),
                    Case::new("Card", vec![Field::new("last4", TypeExpr::String)]),
                    Case::new(
                        "Transfer",
                        vec![
                            Field::new("iban", TypeExpr::String),
                            Field::new("ref", TypeExpr::optional(TypeExpr::String)),
                        ],
                    ),
                ],
            )
            .unwrap(),
        )
        .define_named(
            TypeExpr::record(
                name("billing.Invoice"),
                vec![
                    Field::new("number", TypeExpr::String),
                    Field::new("issued", TypeExpr::Date),
                    Field::new("status", r("billing.Status")),
                    Field::new("lines", TypeExpr::array(r("billing.Line"))),
                    Field::new("tags", TypeExpr::map(TypeExpr::String)),
                    Field::new("payment", TypeExpr::optional(r("billing.Payment"))),
                ],
            )
            .unwrap(),
        )
        .build()
        .unwrap()
}

struct Fixture {
    invoice: Type,
    line: Type,
    payment: Type,
}

impl Fixture {
    fn new() -> Self {
        let module = billing();
        assert!(module.check_well_formed().is_ok());
        assert!(module.recursive_names().is_empty());
        Self {
            invoice: lookup_name(&name("billing.Invoice"), &module).unwrap(),
            line: lookup_name(&name("billing.Line"), &module).unwrap(),
            payment: lookup_name(&name("billing.Payment"), &module).unwrap(),
        }
    }

    fn line(&self, sku: &str, qty: i32, price: f64) -> Value {
        Value::new(
            self.line.clone(),
            BaseValue::Record(vec![string(sku), int(qty), double(price)]),
        )
    }

    fn invoice(&self, lines: Vec<Value>, payment: Option<BaseValue>) -> BaseValue {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let mut tags = BTreeMap::new();
        tags.insert("region".to_string(), string("PK-ICT"));
        BaseValue::Record(vec![
            string("INV-0042"),
            dxi_value::date(date),
            Value::new(self.invoice.clone(), BaseValue::Enum("Issued".into())),
            Value::new(self.invoice.clone(), BaseValue::Array(lines)),
            Value::new(self.invoice.clone(), BaseValue::Map(tags)),
            Value::new(
                self.invoice.clone(),
                BaseValue::Optional(
                    payment.map(|p| Box::new(Value::new(self.payment.clone(), p))),
                ),
            ),
        ])
    }
}

#[test]
fn valid_invoice_passes() {
    let fx = Fixture::new();
    let card = BaseValue::Variant {
        case: "Card".into(),
        values: vec![string("4242")],
    };
    let payload = fx.invoice(vec![fx.line("A-1", 2, 9.5), fx.line("B-7", 1, 120.0)], Some(card));
    assert!(check_base_value(&fx.invoice, &payload));
    assert!(find_mismatch(&fx.invoice, &payload).is_none());
    assert!(check_value(&Value::new(fx.invoice.clone(), payload)));
}

#[test]
fn unpaid_invoice_without_lines_passes() {
    let fx = Fixture::new();
    assert!(check_base_value(&fx.invoice, &fx.invoice(Vec::new(), None)));
}

#[test]
fn diagnostics_table() {
    let fx = Fixture::new();
    let bad_line = Value::new(
        fx.line.clone(),
        BaseValue::Record(vec![string("A-1"), string("two"), double(1.0)]),
    );
    let short_line = Value::new(fx.line.clone(), BaseValue::Record(vec![string("A-1")]));
    let wide_price = Value::new(
        fx.line.clone(),
        BaseValue::Record(vec![string("A-1"), int(1), dxi_value::float(1.0)]),
    );

    let cases: Vec<(&str, BaseValue, &str, MismatchKind)> = vec![
        (
            "qty is not an int",
            fx.invoice(vec![fx.line("ok", 1, 1.0), bad_line], None),
            "$.lines[1].qty",
            MismatchKind::ShapeMismatch {
                expected: ShapeTag::Int32,
                found: ShapeTag::String,
            },
        ),
        (
            "line missing fields",
            fx.invoice(vec![short_line], None),
            "$.lines[0]",
            MismatchKind::ArityMismatch {
                expected: 3,
                found: 1,
            },
        ),
        (
            "price through newtype is not widened",
            fx.invoice(vec![wide_price], None),
            "$.lines[0].price",
            MismatchKind::ShapeMismatch {
                expected: ShapeTag::Float64,
                found: ShapeTag::Float32,
            },
        ),
        (
            "unknown payment case",
            fx.invoice(
                Vec::new(),
                Some(BaseValue::Variant {
                    case: "Cheque".into(),
                    values: Vec::new(),
                }),
            ),
            "$.payment?",
            MismatchKind::UnknownCase {
                case: "Cheque".into(),
            },
        ),
        (
            "transfer reference is not optional",
            fx.invoice(
                Vec::new(),
                Some(BaseValue::Variant {
                    case: "Transfer".into(),
                    values: vec![string("PK36SCBL0000001123456702"), string("r-1")],
                }),
            ),
            "$.payment?#Transfer.ref",
            MismatchKind::ShapeMismatch {
                expected: ShapeTag::Optional,
                found: ShapeTag::String,
            },
        ),
    ];

    for (label, payload, path, kind) in cases {
        assert!(!check_base_value(&fx.invoice, &payload), "{label}");
        let mismatch = find_mismatch(&fx.invoice, &payload).expect(label);
        assert_eq!(mismatch.path_string(), path, "{label}");
        assert_eq!(mismatch.kind, kind, "{label}");
    }
}

#[test]
fn bad_status_symbol_and_tag_value() {
    let fx = Fixture::new();
    let BaseValue::Record(mut parts) = fx.invoice(Vec::new(), None) else {
        unreachable!()
    };
    parts[2] = Value::new(fx.invoice.clone(), BaseValue::Enum("Void".into()));
    let payload = BaseValue::Record(parts.clone());
    let m = find_mismatch(&fx.invoice, &payload).unwrap();
    assert_eq!(m.to_string(), r#"$.status: unknown enum symbol "Void""#);

    parts[2] = Value::new(fx.invoice.clone(), BaseValue::Enum("Paid".into()));
    let mut tags = BTreeMap::new();
    tags.insert("region".to_string(), int(7));
    parts[4] = Value::new(fx.invoice.clone(), BaseValue::Map(tags));
    let m = find_mismatch(&fx.invoice, &BaseValue::Record(parts)).unwrap();
    assert_eq!(m.path_string(), r#"$.tags{"region"}"#);
}

#[test]
fn nested_type_handles_are_not_consulted() {
    // Nested `ty` fields are not consulted: a line carrying the invoice's
    // type handle is still checked against the Line field type.
    let fx = Fixture::new();
    let mislabeled = Value::new(
        fx.invoice.clone(),
        BaseValue::Record(vec![string("X"), int(1), double(2.0)]),
    );
    assert!(check_base_value(&fx.invoice, &fx.invoice(vec![mislabeled], None)));
}
