//! `Sanitise` implementations for standard library types.
//!
//! Scalars are copied verbatim. Containers rebuild themselves through the
//! walker so that every child is traced, offered to its hook, and located by
//! path in errors.
//!
//! `Rc`/`Arc` are walked as trees: each pointer gets a fresh allocation, so
//! sharing between branches is not preserved in the output.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    hash::{BuildHasher, Hash},
    marker::PhantomData,
    rc::Rc,
    sync::Arc,
    time::{Duration, SystemTime},
};

use super::{
    node::{NodeKind, Sanitise},
    walker::Walker,
};
use crate::error::SanitiseError;

// =============================================================================
// Scalars
// =============================================================================

macro_rules! impl_sanitise_scalar {
    (copy: $($ty:ty),* $(,)?) => {
        $(
            impl Sanitise for $ty {
                const KIND: NodeKind = NodeKind::Scalar;

                fn sanitise_with(&self, _walker: &mut Walker<'_>) -> Result<Self, SanitiseError> {
                    Ok(*self)
                }
            }
        )*
    };
    (clone: $($ty:ty),* $(,)?) => {
        $(
            impl Sanitise for $ty {
                const KIND: NodeKind = NodeKind::Scalar;

                fn sanitise_with(&self, _walker: &mut Walker<'_>) -> Result<Self, SanitiseError> {
                    Ok(self.clone())
                }
            }
        )*
    };
}

impl_sanitise_scalar!(
    copy: bool, char, (), i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32,
    f64, Duration, SystemTime, &str,
);
impl_sanitise_scalar!(clone: String, Cow<'_, str>);

impl<T: ?Sized> Sanitise for PhantomData<T> {
    const KIND: NodeKind = NodeKind::Scalar;

    fn sanitise_with(&self, _walker: &mut Walker<'_>) -> Result<Self, SanitiseError> {
        Ok(PhantomData)
    }
}

// =============================================================================
// Pointers
// =============================================================================

impl<T: Sanitise> Sanitise for Option<T> {
    const KIND: NodeKind = NodeKind::Pointer;

    fn sanitise_with(&self, walker: &mut Walker<'_>) -> Result<Self, SanitiseError> {
        self.as_ref().map(|value| walker.walk(value)).transpose()
    }
}

impl<T: Sanitise> Sanitise for Box<T> {
    const KIND: NodeKind = NodeKind::Pointer;

    fn sanitise_with(&self, walker: &mut Walker<'_>) -> Result<Self, SanitiseError> {
        walker.walk(&**self).map(Box::new)
    }
}

impl<T: Sanitise> Sanitise for Rc<T> {
    const KIND: NodeKind = NodeKind::Pointer;

    fn sanitise_with(&self, walker: &mut Walker<'_>) -> Result<Self, SanitiseError> {
        walker.walk(&**self).map(Rc::new)
    }
}

impl<T: Sanitise> Sanitise for Arc<T> {
    const KIND: NodeKind = NodeKind::Pointer;

    fn sanitise_with(&self, walker: &mut Walker<'_>) -> Result<Self, SanitiseError> {
        walker.walk(&**self).map(Arc::new)
    }
}

/// `Ok` and `Err` are walked in place, without a path segment of their own.
impl<T: Sanitise, E: Sanitise> Sanitise for Result<T, E> {
    const KIND: NodeKind = NodeKind::Pointer;

    fn sanitise_with(&self, walker: &mut Walker<'_>) -> Result<Self, SanitiseError> {
        Ok(match self {
            Ok(value) => Ok(walker.walk(value)?),
            Err(err) => Err(walker.walk(err)?),
        })
    }
}

// =============================================================================
// Sequences
// =============================================================================

impl<T: Sanitise> Sanitise for Vec<T> {
    const KIND: NodeKind = NodeKind::Sequence;

    fn sanitise_with(&self, walker: &mut Walker<'_>) -> Result<Self, SanitiseError> {
        self.iter()
            .enumerate()
            .map(|(index, value)| walker.element(index, value))
            .collect()
    }
}

impl<T: Sanitise> Sanitise for VecDeque<T> {
    const KIND: NodeKind = NodeKind::Sequence;

    fn sanitise_with(&self, walker: &mut Walker<'_>) -> Result<Self, SanitiseError> {
        self.iter()
            .enumerate()
            .map(|(index, value)| walker.element(index, value))
            .collect()
    }
}

impl<T: Sanitise, const N: usize> Sanitise for [T; N] {
    const KIND: NodeKind = NodeKind::Sequence;

    fn sanitise_with(&self, walker: &mut Walker<'_>) -> Result<Self, SanitiseError> {
        let elements = self
            .iter()
            .enumerate()
            .map(|(index, value)| walker.element(index, value))
            .collect::<Result<Vec<T>, _>>()?;
        // Lengths always agree.
        <[T; N]>::try_from(elements).map_err(|_| walker.unwritable::<[T; N]>())
    }
}

impl<T: Sanitise> Sanitise for Box<[T]> {
    const KIND: NodeKind = NodeKind::Sequence;

    fn sanitise_with(&self, walker: &mut Walker<'_>) -> Result<Self, SanitiseError> {
        self.iter()
            .enumerate()
            .map(|(index, value)| walker.element(index, value))
            .collect()
    }
}

/// Tuples are sequences whose positions are `[0]`, `[1]`, ...
macro_rules! impl_sanitise_tuple {
    ($(($($index:tt $name:ident),+)),+ $(,)?) => {
        $(
            impl<$($name: Sanitise),+> Sanitise for ($($name,)+) {
                const KIND: NodeKind = NodeKind::Sequence;

                fn sanitise_with(&self, walker: &mut Walker<'_>) -> Result<Self, SanitiseError> {
                    Ok(($(walker.element($index, &self.$index)?,)+))
                }
            }
        )+
    };
}

impl_sanitise_tuple!(
    (0 A),
    (0 A, 1 B),
    (0 A, 1 B, 2 C),
    (0 A, 1 B, 2 C, 3 D),
    (0 A, 1 B, 2 C, 3 D, 4 E),
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F),
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G),
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H),
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I),
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J),
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J, 10 K),
    (0 A, 1 B, 2 C, 3 D, 4 E, 5 F, 6 G, 7 H, 8 I, 9 J, 10 K, 11 L),
);

// =============================================================================
// Mappings
// =============================================================================

impl<K, V, S> Sanitise for HashMap<K, V, S>
where
    K: Sanitise + Clone + Hash + Eq,
    V: Sanitise,
    S: BuildHasher + Clone,
{
    const KIND: NodeKind = NodeKind::Mapping;

    fn sanitise_with(&self, walker: &mut Walker<'_>) -> Result<Self, SanitiseError> {
        let mut result = HashMap::with_capacity_and_hasher(self.len(), self.hasher().clone());
        for (key, value) in self {
            let key = walker.map_key(key)?;
            let value = walker.map_value(value)?;
            result.insert(key, value);
        }
        Ok(result)
    }
}

impl<K, V> Sanitise for BTreeMap<K, V>
where
    K: Sanitise + Clone + Ord,
    V: Sanitise,
{
    const KIND: NodeKind = NodeKind::Mapping;

    fn sanitise_with(&self, walker: &mut Walker<'_>) -> Result<Self, SanitiseError> {
        let mut result = BTreeMap::new();
        for (key, value) in self {
            let key = walker.map_key(key)?;
            let value = walker.map_value(value)?;
            result.insert(key, value);
        }
        Ok(result)
    }
}

impl<T, S> Sanitise for HashSet<T, S>
where
    T: Sanitise + Clone + Hash + Eq,
    S: BuildHasher + Clone,
{
    const KIND: NodeKind = NodeKind::Mapping;

    fn sanitise_with(&self, walker: &mut Walker<'_>) -> Result<Self, SanitiseError> {
        let mut result = HashSet::with_capacity_and_hasher(self.len(), self.hasher().clone());
        for value in self {
            result.insert(walker.map_key(value)?);
        }
        Ok(result)
    }
}

impl<T> Sanitise for BTreeSet<T>
where
    T: Sanitise + Clone + Ord,
{
    const KIND: NodeKind = NodeKind::Mapping;

    fn sanitise_with(&self, walker: &mut Walker<'_>) -> Result<Self, SanitiseError> {
        self.iter().map(|value| walker.map_key(value)).collect()
    }
}

#[cfg(all(test, feature = "derive"))]
mod tests {
    use std::{
        borrow::Cow,
        collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
        rc::Rc,
        sync::Arc,
    };

    use crate::{sanitise, KeyPolicy, Sanitise, Sanitiser};

    #[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Sanitise)]
    struct Secret {
        #[sanitise("ctxA")]
        value: String,
        label: String,
    }

    fn secret(value: &str) -> Secret {
        Secret {
            value: value.to_string(),
            label: "public".to_string(),
        }
    }

    #[test]
    fn scalars_are_copied_verbatim() {
        assert_eq!(sanitise(&42_u32, "ctxA").unwrap(), 42);
        assert_eq!(sanitise(&"text".to_string(), "ctxA").unwrap(), "text");
        assert_eq!(sanitise(&"borrowed", "ctxA").unwrap(), "borrowed");
        let cow: Cow<'_, str> = Cow::Borrowed("cow");
        assert_eq!(sanitise(&cow, "ctxA").unwrap(), "cow");
    }

    #[test]
    fn option_preserves_none() {
        let value: Option<Secret> = None;
        assert_eq!(sanitise(&value, "ctxA").unwrap(), None);
    }

    #[test]
    fn option_walks_some() {
        let value = Some(secret("s"));
        let clean = sanitise(&value, "ctxA").unwrap().unwrap();
        assert_eq!(clean.value, "");
        assert_eq!(clean.label, "public");
    }

    #[test]
    fn pointers_allocate_fresh_pointees() {
        let boxed = Box::new(secret("s"));
        assert_eq!(sanitise(&boxed, "ctxA").unwrap().value, "");

        let shared = Rc::new(secret("s"));
        let clean = sanitise(&shared, "ctxA").unwrap();
        assert!(!Rc::ptr_eq(&shared, &clean));
        assert_eq!(shared.value, "s");
        assert_eq!(clean.value, "");

        let atomic = Arc::new(secret("s"));
        assert_eq!(sanitise(&atomic, "ctxA").unwrap().value, "");
    }

    #[test]
    fn sequences_keep_length_and_order() {
        let values = vec![secret("a"), secret("b"), secret("c")];
        let clean = sanitise(&values, "ctxA").unwrap();
        assert_eq!(clean.len(), 3);
        assert!(clean.iter().all(|value| value.value.is_empty()));

        let deque: VecDeque<Secret> = values.iter().cloned().collect();
        assert_eq!(sanitise(&deque, "ctxB").unwrap(), deque);

        let array = [secret("x"), secret("y")];
        let clean = sanitise(&array, "ctxA").unwrap();
        assert_eq!(clean[1].label, "public");
        assert_eq!(clean[1].value, "");
    }

    #[test]
    fn boxed_slices_keep_length() {
        let values: Box<[Secret]> = vec![secret("a"), secret("b")].into_boxed_slice();
        let clean = sanitise(&values, "ctxA").unwrap();
        assert_eq!(clean.len(), 2);
        assert!(clean.iter().all(|value| value.value.is_empty()));
    }

    #[test]
    fn tuples_are_walked_by_position() {
        let pair = ("plain".to_string(), secret("s"));
        let clean = sanitise(&pair, "ctxA").unwrap();
        assert_eq!(clean.0, "plain");
        assert_eq!(clean.1.value, "");

        let single = (secret("s"),);
        assert_eq!(sanitise(&single, "ctxB").unwrap(), single);

        let wide = (
            1_u8,
            2_u16,
            3_u32,
            4_u64,
            5_i8,
            6_i16,
            7_i32,
            8_i64,
            'x',
            true,
            (),
            secret("s"),
        );
        let clean = sanitise(&wide, "ctxA").unwrap();
        assert_eq!(clean.8, 'x');
        assert_eq!(clean.11.value, "");
    }

    #[test]
    fn results_walk_either_side() {
        let ok: Result<Secret, Secret> = Ok(secret("s"));
        assert_eq!(sanitise(&ok, "ctxA").unwrap().unwrap().value, "");

        let err: Result<u32, Secret> = Err(secret("s"));
        let clean = sanitise(&err, "ctxA").unwrap().unwrap_err();
        assert_eq!(clean.value, "");
        assert_eq!(clean.label, "public");
    }

    #[test]
    fn empty_containers_stay_empty() {
        let values: Vec<Secret> = Vec::new();
        assert!(sanitise(&values, "ctxA").unwrap().is_empty());
        let map: HashMap<String, Secret> = HashMap::new();
        assert!(sanitise(&map, "ctxA").unwrap().is_empty());
    }

    #[test]
    fn hashmap_walks_values_and_keeps_plain_keys() {
        let mut map = HashMap::new();
        map.insert("key".to_string(), secret("s"));
        let clean = sanitise(&map, "ctxA").unwrap();
        assert_eq!(clean.len(), 1);
        assert_eq!(clean["key"].value, "");
        assert_eq!(clean["key"].label, "public");
    }

    #[test]
    fn btreemap_sanitises_structured_keys_by_default() {
        let mut map = BTreeMap::new();
        map.insert(secret("key-secret"), 1_u32);
        let clean = sanitise(&map, "ctxA").unwrap();
        let (key, value) = clean.into_iter().next().unwrap();
        assert_eq!(key.value, "");
        assert_eq!(value, 1);
    }

    #[test]
    fn preserve_policy_clones_keys() {
        let mut map = HashMap::new();
        map.insert(secret("key-secret"), secret("value-secret"));
        let clean = Sanitiser::new("ctxA")
            .key_policy(KeyPolicy::Preserve)
            .sanitise(&map)
            .unwrap();
        let (key, value) = clean.iter().next().unwrap();
        assert_eq!(key.value, "key-secret");
        assert_eq!(value.value, "");
    }

    #[test]
    fn sanitised_keys_may_collide() {
        let mut map = BTreeMap::new();
        map.insert(secret("one"), 1_u32);
        map.insert(secret("two"), 2_u32);
        let clean = sanitise(&map, "ctxA").unwrap();
        assert_eq!(clean.len(), 1);
    }

    #[test]
    fn sets_follow_the_key_policy() {
        let set: HashSet<Secret> = [secret("a")].into_iter().collect();
        let clean = sanitise(&set, "ctxA").unwrap();
        assert!(clean.iter().all(|value| value.value.is_empty()));

        let set: BTreeSet<Secret> = [secret("a")].into_iter().collect();
        let clean = Sanitiser::new("ctxA")
            .key_policy(KeyPolicy::Preserve)
            .sanitise(&set)
            .unwrap();
        assert_eq!(clean, set);
    }
}
