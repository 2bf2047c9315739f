//! End-to-end tests driving the derive macros, the registry and the payload
//! codec together.

use rv_reflect::derive::{Reflected, reflect_impl};
use rv_reflect::payload::{ReadError, TYPE_NAME_KEY};
use rv_reflect::{PolyPtr, Reflected, Registry, Serializable};
use serde_json::json;

// -----------------------------------------------------------------------------
// Fixtures

#[derive(Reflected, Default, PartialEq, Debug)]
struct Point {
    #[reflected]
    x: i32,
    #[reflected]
    y: i32,
}

#[derive(Reflected, Default, PartialEq, Debug)]
struct Monster {
    #[reflected]
    name: String,
    #[reflected]
    health: i32,
    #[reflected]
    waypoints: Vec<f32>,
    secret: u32,
}

#[derive(Reflected, Default, PartialEq, Debug)]
struct Engine {
    #[reflected]
    rpm: i32,
}

#[derive(Reflected, Default, PartialEq, Debug)]
struct Car {
    #[reflected]
    engine: Box<Engine>,
}

#[derive(Reflected, Default, PartialEq, Debug)]
struct Circle {
    #[reflected]
    radius: f64,
}

#[derive(Reflected, Default)]
struct Holder {
    #[reflected]
    shape: PolyPtr,
}

#[derive(Reflected, Default)]
struct Fleet {
    #[reflected]
    parts: Vec<PolyPtr>,
}

#[derive(Reflected, Default)]
struct Actor {
    #[reflected]
    id: u32,
}

#[reflect_impl]
impl Actor {
    #[reflected]
    fn double(&mut self) -> u32 {
        self.id *= 2;
        self.id
    }
}

#[derive(Reflected, Default)]
struct Npc {
    #[reflected(base)]
    actor: Actor,
    #[reflected]
    dialogue: String,
}

#[derive(Reflected, Default)]
struct Counter {
    #[reflected]
    count: i32,
}

#[reflect_impl]
impl Counter {
    #[reflected]
    fn reset(&mut self) {
        self.count = 0;
    }

    #[reflected]
    fn add(&mut self, amount: i32) -> i32 {
        self.count += amount;
        self.count
    }

    fn helper(&self) -> i32 {
        self.count
    }
}

#[derive(Reflected, Default, PartialEq, Debug)]
enum Mode {
    #[default]
    Idle,
    Active,
    Off,
}

// -----------------------------------------------------------------------------
// Serialization laws

#[test]
fn round_trip_law() {
    let point = Point { x: 3, y: 4 };
    let payload = point.write().unwrap();
    assert_eq!(payload, json!({ "x": 3, "y": 4 }));
    assert_eq!(Point::read_new(&payload).unwrap(), point);

    let monster = Monster {
        name: String::from("slime"),
        health: 20,
        waypoints: vec![1.0, 2.5, 4.0],
        secret: 5,
    };
    let payload = monster.write().unwrap();
    let restored = Monster::read_new(&payload).unwrap();
    assert_eq!(restored.name, monster.name);
    assert_eq!(restored.health, monster.health);
    assert_eq!(restored.waypoints, monster.waypoints);
    assert_eq!(monster.secret, 5);
}

#[test]
fn missing_fields_keep_defaults() {
    let point = Point::read_new(&json!({ "x": 3 })).unwrap();
    assert_eq!(point, Point { x: 3, y: 0 });

    let point = Point::read_new(&json!({ "x": 1, "y": null })).unwrap();
    assert_eq!(point, Point { x: 1, y: 0 });
}

#[test]
fn unknown_fields_are_ignored() {
    let point = Point::read_new(&json!({ "x": 1, "y": 2, "z": 9 })).unwrap();
    assert_eq!(point, Point { x: 1, y: 2 });
}

#[test]
fn uncompiled_fields_stay_out_of_the_schema() {
    let monster = Monster {
        secret: 99,
        ..Monster::default()
    };
    let payload = monster.write().unwrap();
    assert!(payload.get("secret").is_none());

    // Reading a payload that mentions the uncompiled field ignores it.
    let restored = Monster::read_new(&json!({ "secret": 7, "health": 3 })).unwrap();
    assert_eq!(restored.secret, 0);
    assert_eq!(restored.health, 3);
}

#[test]
fn array_length_fidelity() {
    let monster = Monster {
        waypoints: vec![1.0, 2.0, 3.0],
        ..Monster::default()
    };
    let payload = monster.write().unwrap();
    assert_eq!(payload["waypoints"], json!([1.0, 2.0, 3.0]));

    // Reading into a longer container shrinks it to the payload length.
    let mut target = Monster {
        waypoints: vec![9.0; 6],
        ..Monster::default()
    };
    Monster::read(&payload, &mut target).unwrap();
    assert_eq!(target.waypoints, [1.0, 2.0, 3.0]);
}

#[test]
fn wrong_payload_shape_is_a_recoverable_error() {
    assert!(matches!(
        Point::read_new(&json!([1, 2])),
        Err(ReadError::KindMismatch { .. })
    ));
    assert!(matches!(
        Monster::read_new(&json!({ "waypoints": 3 })),
        Err(ReadError::KindMismatch { .. })
    ));
}

// -----------------------------------------------------------------------------
// Pointer envelopes

#[test]
fn boxed_field_round_trips_through_the_sentinel() {
    let car = Car {
        engine: Box::new(Engine { rpm: 4200 }),
    };
    let payload = car.write().unwrap();
    assert_eq!(
        payload["engine"],
        json!({ "$typeName": "*Engine", "$context": { "rpm": 4200 } })
    );
    assert_eq!(Car::read_new(&payload).unwrap(), car);
}

#[test]
fn boxed_field_accepts_a_dynamic_name() {
    // No sentinel: the reader goes through the registry by name.
    let payload = json!({
        "engine": { "$typeName": "Engine", "$context": { "rpm": 100 } }
    });
    let car = Car::read_new(&payload).unwrap();
    assert_eq!(car.engine.rpm, 100);
}

#[test]
fn polymorphic_dispatch_records_the_dynamic_name() {
    let holder = Holder {
        shape: PolyPtr::new(Circle { radius: 2.0 }),
    };
    let payload = holder.write().unwrap();
    assert_eq!(payload["shape"][TYPE_NAME_KEY], json!("Circle"));

    let restored = Holder::read_new(&payload).unwrap();
    assert_eq!(restored.shape.type_name(), "Circle");
    assert_eq!(
        restored.shape.downcast_ref::<Circle>(),
        Some(&Circle { radius: 2.0 })
    );
}

#[test]
fn poly_ptr_array_reconstructs_every_element() {
    let fleet = Fleet {
        parts: vec![
            PolyPtr::new(Circle { radius: 1.0 }),
            PolyPtr::new(Circle { radius: 2.0 }),
            PolyPtr::new(Circle { radius: 3.0 }),
        ],
    };
    let payload = fleet.write().unwrap();
    assert_eq!(payload["parts"].as_array().unwrap().len(), 3);

    let restored = Fleet::read_new(&payload).unwrap();
    assert_eq!(restored.parts.len(), 3);
    for (index, part) in restored.parts.iter().enumerate() {
        assert_eq!(part.type_name(), "Circle");
        let radius = part.downcast_ref::<Circle>().unwrap().radius;
        assert_eq!(radius, (index + 1) as f64);
    }
}

// -----------------------------------------------------------------------------
// Registry

#[test]
fn type_meta_resolves_registered_members() {
    let meta = Registry::global().type_meta("Point");
    assert!(meta.is_valid());

    let names: Vec<_> = meta
        .fields()
        .iter()
        .map(|accessor| accessor.field_name())
        .collect();
    assert_eq!(names, ["x", "y"]);

    assert!(!Registry::global().type_meta("NoSuchType").is_valid());
}

#[test]
fn field_accessors_get_and_set() {
    let meta = Registry::global().type_meta("Point");
    let accessor = meta.field("y").unwrap();

    let mut point = Point { x: 1, y: 2 };
    assert_eq!(accessor.get_as::<i32>(&point), Ok(&2));

    accessor.set(&mut point, Box::new(7_i32)).unwrap();
    assert_eq!(point, Point { x: 1, y: 7 });

    // The accessor re-checks the erased instance type.
    let monster = Monster::default();
    assert!(accessor.get(&monster).is_err());
}

#[test]
fn array_accessor_is_bounds_checked() {
    use rv_reflect::access::AccessError;

    let accessor = Registry::global().array_accessor("Vec<f32>").unwrap();
    assert_eq!(accessor.element_type_name(), "f32");

    let mut waypoints = vec![1.0_f32, 2.0];
    assert_eq!(accessor.len(&waypoints), Ok(2));
    assert_eq!(accessor.get_as::<f32>(&waypoints, 1), Ok(&2.0));

    accessor.set(&mut waypoints, 0, Box::new(9.0_f32)).unwrap();
    assert_eq!(waypoints[0], 9.0);

    assert_eq!(
        accessor.get(&waypoints, 5).unwrap_err(),
        AccessError::OutOfBounds { index: 5, len: 2 }
    );
}

#[test]
fn construct_from_payload_by_name() {
    let registry = Registry::global();

    let instance = registry
        .construct_from_payload("Point", &json!({ "x": 8, "y": 9 }))
        .unwrap();
    assert_eq!(instance.type_name(), "Point");
    assert_eq!(instance.downcast_ref::<Point>(), Some(&Point { x: 8, y: 9 }));

    let err = registry
        .construct_from_payload("Ghost", &json!({}))
        .unwrap_err();
    assert_eq!(
        err,
        ReadError::UnknownType {
            type_name: String::from("Ghost"),
        }
    );
}

#[test]
fn duplicate_registration_is_idempotent() {
    let mut builder = Registry::builder();
    <Point as Reflected>::register(&mut builder);
    <Point as Reflected>::register(&mut builder);
    let registry = builder.finish();

    // The class map keeps the first bundle; the field multimap accumulates.
    assert!(registry.contains_class("Point"));
    assert_eq!(registry.class_names().count(), 1);
    assert_eq!(registry.declared_fields("Point").len(), 4);

    let instance = registry
        .construct_from_payload("Point", &json!({ "x": 1, "y": 2 }))
        .unwrap();
    assert_eq!(instance.downcast_ref::<Point>(), Some(&Point { x: 1, y: 2 }));
}

// -----------------------------------------------------------------------------
// Methods

#[test]
fn methods_invoke_with_arguments_and_return_values() {
    use rv_reflect::access::InvokeError;

    let meta = Registry::global().type_meta("Counter");
    let add = meta.method("add").unwrap();

    let mut counter = Counter { count: 2 };
    assert_eq!(counter.helper(), 2);

    let result = add
        .invoke_as::<i32>(&mut counter, vec![Box::new(3_i32)])
        .unwrap();
    assert_eq!(result, 5);
    assert_eq!(counter.count, 5);

    // Argument list shape is checked at the boundary.
    assert_eq!(
        add.invoke(&mut counter, vec![]).unwrap_err(),
        InvokeError::ArgCount {
            expected: 1,
            received: 0,
        }
    );
    assert_eq!(
        add.invoke(&mut counter, vec![Box::new("nope")]).unwrap_err(),
        InvokeError::ArgType {
            index: 0,
            expected: "i32",
        }
    );

    let mut point = Point::default();
    assert_eq!(
        add.invoke(&mut point, vec![Box::new(1_i32)]).unwrap_err(),
        InvokeError::WrongReceiver {
            expected: "Counter",
        }
    );

    let reset = meta.method("reset").unwrap();
    reset.invoke(&mut counter, vec![]).unwrap();
    assert_eq!(counter.count, 0);
}

// -----------------------------------------------------------------------------
// Base flattening

#[test]
fn base_members_flatten_into_the_derived_meta() {
    let meta = Registry::global().type_meta("Npc");

    let names: Vec<_> = meta
        .fields()
        .iter()
        .map(|accessor| accessor.field_name())
        .collect();
    assert_eq!(names, ["actor", "dialogue", "id"]);

    let inherited = meta.field("id").unwrap();
    assert!(inherited.is_inherited());
    assert_eq!(inherited.owner_type_name(), "Actor");

    let mut npc = Npc {
        actor: Actor { id: 21 },
        dialogue: String::from("hello"),
    };
    assert_eq!(inherited.get_as::<u32>(&npc), Ok(&21));

    inherited.set(&mut npc, Box::new(40_u32)).unwrap();
    assert_eq!(npc.actor.id, 40);

    // Methods flatten the same way, invoked through the projection.
    let double = meta.method("double").unwrap();
    let result = double.invoke_as::<u32>(&mut npc, vec![]).unwrap();
    assert_eq!(result, 80);
    assert_eq!(npc.actor.id, 80);
}

// -----------------------------------------------------------------------------
// Enums

#[test]
fn enums_round_trip_by_variant_name() {
    let payload = Mode::Active.write().unwrap();
    assert_eq!(payload, json!("Active"));
    assert_eq!(Mode::read_new(&payload).unwrap(), Mode::Active);

    assert_eq!(
        Mode::read_new(&json!("Sideways")),
        Err(ReadError::UnknownVariant {
            type_name: "Mode",
            variant: String::from("Sideways"),
        })
    );

    let instance = Registry::global()
        .construct_from_payload("Mode", &json!("Off"))
        .unwrap();
    assert_eq!(instance.downcast_ref::<Mode>(), Some(&Mode::Off));
}
