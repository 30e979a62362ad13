//! End-to-end tests for the public sanitise API.
//!
//! These tests exercise the integration of:
//! - `Sanitise` derive traversal for structs and enums,
//! - context matching (lists, wildcard, empty tokens), and
//! - container traversal for common standard library types.

use std::collections::{BTreeMap, HashMap};

use sanitise::{
    sanitise, sanitise_in_place, Dynamic, KeyPolicy, Sanitise, SanitiseError, SanitiseExt,
    Sanitiser, SelfSanitise,
};

#[derive(Clone, Debug, Default, PartialEq, Sanitise)]
struct Record {
    #[sanitise("ctxA")]
    a: String,
    b: i64,
}

fn record() -> Record {
    Record {
        a: "secret".into(),
        b: 7,
    }
}

#[test]
fn test_tagged_field_is_masked_under_its_context() {
    let clean = sanitise(&record(), "ctxA").unwrap();
    assert_eq!(
        clean,
        Record {
            a: String::new(),
            b: 7
        }
    );
}

#[test]
fn test_other_contexts_leave_value_untouched() {
    assert_eq!(sanitise(&record(), "ctxB").unwrap(), record());
    assert_eq!(sanitise(&record(), "").unwrap(), record());
}

#[test]
fn test_source_is_never_mutated() {
    let source = record();
    let _ = sanitise(&source, "ctxA").unwrap();
    assert_eq!(source, record());
}

#[derive(Debug, Default, Sanitise)]
struct Chain {
    #[sanitise("ctxA")]
    next: Option<Box<Chain>>,
    label: String,
}

#[test]
fn test_tagged_pointer_becomes_none() {
    let chain = Chain {
        next: Some(Box::new(Chain::default())),
        label: "head".into(),
    };
    let clean = sanitise(&chain, "ctxA").unwrap();
    assert!(clean.next.is_none());
    assert_eq!(clean.label, "head");

    let kept = sanitise(&chain, "ctxB").unwrap();
    assert!(kept.next.is_some());
}

#[test]
fn test_map_values_are_sanitised_and_string_keys_kept() {
    let mut map = HashMap::new();
    map.insert("k".to_string(), record());

    let clean = sanitise(&map, "ctxA").unwrap();
    assert_eq!(clean.len(), 1);
    let entry = clean.get("k").unwrap();
    assert_eq!(entry.a, "");
    assert_eq!(entry.b, 7);
}

#[derive(Clone, Debug, Default, PartialEq, Sanitise)]
#[sanitise(hook)]
struct Account {
    #[sanitise("ctxA")]
    password: String,
    seen_password: String,
    notes: String,
}

impl SelfSanitise for Account {
    fn sanitise(&mut self, context: &str) {
        // Records what the hook observed, then masks further.
        self.seen_password = self.password.clone();
        if context == "ctxA" {
            self.notes.clear();
        }
    }
}

#[test]
fn test_hook_runs_after_tag_masking() {
    let account = Account {
        password: "hunter2".into(),
        seen_password: String::new(),
        notes: "internal".into(),
    };

    let clean = sanitise(&account, "ctxA").unwrap();
    assert_eq!(clean.password, "");
    assert_eq!(clean.seen_password, "", "hook must never see the original");
    assert_eq!(clean.notes, "");

    let other = sanitise(&account, "ctxB").unwrap();
    assert_eq!(other.password, "hunter2");
    assert_eq!(other.seen_password, "hunter2");
    assert_eq!(other.notes, "internal");
}

#[derive(Clone, Debug, Default, PartialEq, Sanitise)]
struct Profile {
    #[sanitise("logs,audit")]
    email: String,
    #[sanitise("*")]
    token: String,
    #[sanitise("audit")]
    address: Address,
    billing: Address,
    tags: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Sanitise)]
struct Address {
    #[sanitise("logs")]
    street: String,
    city: String,
}

fn profile() -> Profile {
    Profile {
        email: "ada@example.com".into(),
        token: "tok".into(),
        address: Address {
            street: "1 Main St".into(),
            city: "London".into(),
        },
        billing: Address {
            street: "2 Side St".into(),
            city: "Paris".into(),
        },
        tags: vec!["vip".into()],
    }
}

#[test]
fn test_sanitising_is_idempotent() {
    for context in ["logs", "audit", "other"] {
        let once = sanitise(&profile(), context).unwrap();
        let twice = sanitise(&once, context).unwrap();
        assert_eq!(once, twice, "context {context}");
    }
}

#[test]
fn test_untagged_fields_are_deep_equal() {
    let clean = sanitise(&profile(), "logs").unwrap();
    assert_eq!(clean.tags, profile().tags);
    assert_eq!(clean.billing.city, "Paris");
}

#[test]
fn test_wildcard_masks_under_every_context() {
    for context in ["logs", "audit", "anything", ""] {
        assert_eq!(sanitise(&profile(), context).unwrap().token, "");
    }
}

#[test]
fn test_masked_struct_is_zeroed_whole() {
    let clean = sanitise(&profile(), "audit").unwrap();
    assert_eq!(clean.address, Address::default());
    assert_eq!(clean.email, "");
    // `billing` is untagged: its `logs`-only street survives under `audit`.
    assert_eq!(clean.billing.street, "2 Side St");
}

#[test]
fn test_nested_tags_are_reached_through_untagged_fields() {
    let clean = sanitise(&profile(), "logs").unwrap();
    assert_eq!(clean.address.street, "");
    assert_eq!(clean.address.city, "London");
    assert_eq!(clean.billing.street, "");
    assert_eq!(clean.billing.city, "Paris");
}

#[derive(Clone, Debug, Default, PartialEq, Sanitise)]
struct Odd {
    #[sanitise("")]
    never: String,
    #[sanitise(" logs")]
    spaced: String,
    #[sanitise(",logs,")]
    padded: String,
}

#[test]
fn test_tokens_are_matched_verbatim() {
    let odd = Odd {
        never: "n".into(),
        spaced: "s".into(),
        padded: "p".into(),
    };

    let clean = sanitise(&odd, "logs").unwrap();
    assert_eq!(clean.never, "n");
    assert_eq!(clean.spaced, "s");
    assert_eq!(clean.padded, "");

    let clean = sanitise(&odd, " logs").unwrap();
    assert_eq!(clean.spaced, "");

    let clean = sanitise(&odd, "").unwrap();
    assert_eq!(clean, odd);
}

#[derive(Clone, Debug, PartialEq, Sanitise)]
enum Credential {
    Password(#[sanitise("logs")] String),
    ApiKey {
        #[sanitise("logs,audit")]
        key: String,
        owner: String,
    },
    Anonymous,
}

#[test]
fn test_enum_variants_keep_their_shape() {
    assert_eq!(
        sanitise(&Credential::Password("pw".into()), "logs").unwrap(),
        Credential::Password(String::new())
    );

    let key = Credential::ApiKey {
        key: "k".into(),
        owner: "ops".into(),
    };
    assert_eq!(
        sanitise(&key, "audit").unwrap(),
        Credential::ApiKey {
            key: String::new(),
            owner: "ops".into()
        }
    );

    assert_eq!(
        sanitise(&Credential::Anonymous, "logs").unwrap(),
        Credential::Anonymous
    );
}

#[derive(Clone, Debug, PartialEq, Sanitise)]
struct Pair(#[sanitise("logs")] String, u16);

#[derive(Clone, Debug, PartialEq, Sanitise)]
struct Marker;

#[test]
fn test_tuple_and_unit_structs() {
    assert_eq!(
        sanitise(&Pair("a".into(), 3), "logs").unwrap(),
        Pair(String::new(), 3)
    );
    assert_eq!(sanitise(&Marker, "logs").unwrap(), Marker);
}

#[derive(Clone, Debug, PartialEq, Sanitise)]
struct Envelope<T> {
    #[sanitise("logs")]
    meta: Option<T>,
    body: T,
}

#[test]
fn test_generic_containers() {
    let envelope = Envelope {
        meta: Some(record()),
        body: record(),
    };
    let clean = sanitise(&envelope, "ctxA").unwrap();
    assert_eq!(clean.meta.unwrap().a, "");
    assert_eq!(clean.body.a, "");

    let clean = sanitise(&envelope, "logs").unwrap();
    assert_eq!(clean.meta, None);
    assert_eq!(clean.body, record());
}

#[derive(Clone, Debug, PartialEq)]
struct External {
    raw: Vec<u8>,
}

impl Default for External {
    fn default() -> Self {
        Self { raw: vec![0] }
    }
}

#[derive(Clone, Debug, PartialEq, Sanitise)]
struct WithOpaque {
    #[sanitise(opaque)]
    kept: External,
    #[sanitise("logs", opaque)]
    dropped: External,
}

#[test]
fn test_opaque_fields_are_cloned_or_zeroed() {
    let value = WithOpaque {
        kept: External { raw: vec![1, 2] },
        dropped: External { raw: vec![3] },
    };
    let clean = sanitise(&value, "logs").unwrap();
    assert_eq!(clean.kept, External { raw: vec![1, 2] });
    assert_eq!(clean.dropped, External::default());
}

#[derive(Clone, Debug, PartialEq, Sanitise)]
struct RawNames {
    #[sanitise("logs")]
    r#type: String,
}

#[test]
fn test_raw_identifiers() {
    let value = RawNames {
        r#type: "t".into(),
    };
    assert_eq!(sanitise(&value, "logs").unwrap().r#type, "");
}

#[test]
fn test_sequences_keep_length_and_order() {
    let values = vec![record(), record()];
    let clean = sanitise(&values, "ctxA").unwrap();
    assert_eq!(clean.len(), 2);
    assert!(clean.iter().all(|r| r.a.is_empty() && r.b == 7));

    let array = [record(), record(), record()];
    let clean = sanitise(&array, "ctxA").unwrap();
    assert!(clean.iter().all(|r| r.a.is_empty()));
}

#[derive(Clone, Debug, Sanitise)]
struct Borrowed<'a> {
    #[sanitise("ctxA")]
    name: &'a str,
    id: u32,
}

#[derive(Clone, Debug, Sanitise)]
struct Holder<'a> {
    items: Vec<Borrowed<'a>>,
}

#[test]
fn test_borrowed_field_cannot_be_masked() {
    let holder = Holder {
        items: vec![
            Borrowed { name: "a", id: 1 },
            Borrowed { name: "b", id: 2 },
        ],
    };

    let err = sanitise(&holder, "ctxA").unwrap_err();
    assert_eq!(
        err,
        SanitiseError::UnwritableField {
            path: "items[0].name".to_string(),
            type_name: "&str",
        }
    );
    assert_eq!(
        err.to_string(),
        "cannot mask unwritable field `items[0].name` of type `&str`"
    );

    let kept = sanitise(&holder, "ctxB").unwrap();
    assert_eq!(kept.items[1].name, "b");
    assert_eq!(kept.items[1].id, 2);
}

#[derive(Debug, Sanitise)]
struct View<'a> {
    inner: &'a Record,
    #[sanitise("ctxB")]
    bytes: &'a [u8],
}

#[test]
fn test_borrowed_fields_of_any_type_are_shared_not_walked() {
    let source = record();
    let payload = [1_u8, 2, 3];
    let view = View {
        inner: &source,
        bytes: &payload,
    };

    // The borrowed record is shared with the source, so its tags do not apply.
    let clean = sanitise(&view, "ctxA").unwrap();
    assert!(std::ptr::eq(clean.inner, &source));
    assert_eq!(clean.inner.a, "secret");
    assert_eq!(clean.bytes, &payload[..]);

    let err = sanitise(&view, "ctxB").unwrap_err();
    assert_eq!(
        err,
        SanitiseError::UnwritableField {
            path: "bytes".to_string(),
            type_name: "&[u8]",
        }
    );
}

#[derive(Clone, Debug, PartialEq, Sanitise)]
struct Mixed<'a> {
    #[sanitise("ctxA")]
    owned: String,
    #[sanitise("ctxA")]
    borrowed: &'a str,
}

#[test]
fn test_in_place_leaves_value_untouched_on_error() {
    let mut value = Mixed {
        owned: "o".into(),
        borrowed: "b",
    };
    let err = sanitise_in_place(&mut value, "ctxA").unwrap_err();
    assert_eq!(err.path(), "borrowed");
    assert_eq!(value.owned, "o");

    let mut value = record();
    sanitise_in_place(&mut value, "ctxA").unwrap();
    assert_eq!(value.a, "");
}

#[derive(Debug, Sanitise)]
struct Event {
    #[sanitise("audit")]
    actor: String,
    payload: Dynamic,
    extra: Option<Dynamic>,
}

#[test]
fn test_dynamic_slots_use_concrete_type_tags() {
    let event = Event {
        actor: "ada".into(),
        payload: Box::new(record()),
        extra: Some(Box::new(42_u64)),
    };

    let clean = sanitise(&event, "ctxA").unwrap();
    assert_eq!(clean.actor, "ada");
    let payload = clean.payload.downcast_ref::<Record>().unwrap();
    assert_eq!(payload.a, "");
    assert_eq!(payload.b, 7);

    let extra = clean.extra.as_deref().unwrap();
    assert!(extra.is::<u64>());
    assert_eq!(extra.downcast_ref::<u64>(), Some(&42));

    let source = event.payload.downcast_ref::<Record>().unwrap();
    assert_eq!(source.a, "secret");
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Sanitise)]
struct UserKey {
    #[sanitise("logs")]
    email: String,
    id: u32,
}

#[test]
fn test_key_policy_controls_structured_keys() {
    let mut map = BTreeMap::new();
    map.insert(
        UserKey {
            email: "ada@example.com".into(),
            id: 1,
        },
        "v".to_string(),
    );

    let masked = sanitise(&map, "logs").unwrap();
    let key = masked.keys().next().unwrap();
    assert_eq!(key.email, "");
    assert_eq!(key.id, 1);

    let preserved = Sanitiser::new("logs")
        .key_policy(KeyPolicy::Preserve)
        .sanitise(&map)
        .unwrap();
    assert_eq!(preserved, map);
}

#[test]
fn test_extension_method_matches_free_function() {
    assert_eq!(record().sanitised("ctxA").unwrap(), sanitise(&record(), "ctxA").unwrap());
}
