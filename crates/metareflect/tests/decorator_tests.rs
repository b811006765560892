//! Integration tests for decorators, options and the process-wide context

use std::cell::Cell;
use std::rc::Rc;

use metareflect::{
    apply, global, metadata, Apply, ClassDecl, Decorator, DecoratorSite, MemberDecl,
    MetadataSource, MetadataStore, ReflectOptions, ReflectionContext, Target, TargetKey, TypeRef,
    Value,
};

const KEY: &str = "key";
const VALUE: &str = "value";

#[test]
fn test_metadata_on_class() {
    let mut ctx = ReflectionContext::new();
    let id = ctx
        .define_class(ClassDecl::new("ClassMetadataTest").decorate(metadata(KEY, VALUE)))
        .unwrap();
    assert_eq!(
        ctx.metadata()
            .metadata(KEY, ctx.classes(), Target::Class(id), None),
        Some(Value::from(VALUE))
    );
}

#[test]
fn test_metadata_on_static_method() {
    let mut ctx = ReflectionContext::new();
    let id = ctx
        .define_class(
            ClassDecl::new("StaticMethodMetadataTest")
                .member(MemberDecl::method("test").as_static().decorate(metadata(KEY, VALUE))),
        )
        .unwrap();
    assert_eq!(
        ctx.metadata()
            .own_metadata(KEY, TargetKey::Class(id), Some("test")),
        Some(Value::from(VALUE))
    );
    assert_eq!(
        ctx.metadata()
            .own_metadata(KEY, TargetKey::Prototype(id), Some("test")),
        None
    );
}

#[test]
fn test_metadata_on_instance_method() {
    let mut ctx = ReflectionContext::new();
    let id = ctx
        .define_class(
            ClassDecl::new("MethodMetadataTest")
                .member(MemberDecl::method("test").decorate(metadata(KEY, VALUE))),
        )
        .unwrap();
    let instance = ctx.instantiate(id).unwrap();
    assert_eq!(
        ctx.metadata()
            .metadata(KEY, ctx.classes(), Target::from(&instance), Some("test")),
        Some(Value::from(VALUE))
    );
}

#[test]
fn test_metadata_on_property() {
    let mut ctx = ReflectionContext::new();
    let id = ctx
        .define_class(
            ClassDecl::new("PropertyMetadataTest").member(
                MemberDecl::property("test")
                    .typed(TypeRef::STRING)
                    .decorate(metadata(KEY, VALUE)),
            ),
        )
        .unwrap();
    let instance = ctx.instantiate(id).unwrap();
    assert_eq!(
        ctx.metadata()
            .metadata(KEY, ctx.classes(), Target::from(&instance), Some("test")),
        Some(Value::from(VALUE))
    );
}

fn counting(counter: &Rc<Cell<u32>>) -> impl Decorator + 'static {
    let counter = counter.clone();
    move |_: &mut MetadataStore, _: &DecoratorSite| counter.set(counter.get() + 1)
}

#[test]
fn test_apply_on_class_member_and_method() {
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));
    let composed = || Apply::new().then(counting(&first)).then(counting(&second));

    let mut ctx = ReflectionContext::new();
    ctx.define_class(
        ClassDecl::new("TestClass")
            .decorate(composed())
            .member(MemberDecl::property("prop").decorate(composed()))
            .member(MemberDecl::method("doSomething").decorate(composed())),
    )
    .unwrap();

    assert_eq!(first.get(), 3);
    assert_eq!(second.get(), 3);
}

#[test]
fn test_apply_composes_metadata() {
    let mut ctx = ReflectionContext::new();
    let id = ctx
        .define_class(ClassDecl::new("Composed").member(MemberDecl::property("p").decorate(apply([
            Box::new(metadata("app:a", 1)) as Box<dyn Decorator>,
            Box::new(metadata("app:b", 2)),
        ]))))
        .unwrap();

    let instance = ctx.instantiate(id).unwrap();
    let resolved = ctx
        .resolver()
        .resolve_member("app:", Target::from(&instance), "p");
    let keys: Vec<&str> = resolved.keys().collect();
    assert_eq!(keys, vec!["design:type", "a", "b"]);
}

#[test]
fn test_custom_type_key() {
    let options = ReflectOptions::from_json(r#"{ "type_key": "meta:type" }"#).unwrap();
    let mut ctx = ReflectionContext::with_options(options);
    let id = ctx
        .define_class(
            ClassDecl::new("Model").member(
                MemberDecl::property("name")
                    .typed(TypeRef::STRING)
                    .decorate(metadata("app:required", true)),
            ),
        )
        .unwrap();

    let instance = ctx.instantiate(id).unwrap();
    let resolver = ctx.resolver();
    let resolved = resolver.resolve_member("app:", Target::from(&instance), "name");
    let keys: Vec<&str> = resolved.keys().collect();
    assert_eq!(keys, vec!["meta:type", "required"]);
    assert_eq!(
        resolver.resolve_declared_type(Target::from(&instance), "name"),
        Some("String".to_string())
    );
}

#[test]
fn test_global_context() {
    let id = global()
        .write()
        .define_class(
            ClassDecl::new("GlobalContextModel")
                .member(MemberDecl::property("field").decorate(metadata("g:flag", true))),
        )
        .unwrap();

    let ctx = global().read();
    assert_eq!(ctx.class_by_name("GlobalContextModel").map(|c| c.id), Some(id));
    let instance = ctx.instantiate(id).unwrap();
    let resolved = ctx
        .resolver()
        .resolve_member("g:", Target::from(&instance), "field");
    assert_eq!(resolved.get("flag"), Some(&Value::from(true)));
}
