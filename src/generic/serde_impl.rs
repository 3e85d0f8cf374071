use crate::{
	generic::{node::Node, OrderedMap, OrderedSet},
	Compare,
};
use cc_traits::{SimpleCollectionMut, SimpleCollectionRef, Slab, SlabMut};
use serde::{
	de::{MapAccess, SeqAccess, Visitor},
	ser::{SerializeMap, SerializeSeq},
	Deserialize, Deserializer, Serialize, Serializer,
};
use std::{fmt, marker::PhantomData};

impl<K: Serialize, V: Serialize, C, S: Slab<Node<(K, V)>>> Serialize for OrderedMap<K, V, C, S>
where
	S: SimpleCollectionRef,
{
	fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
		let mut map = serializer.serialize_map(Some(self.len()))?;
		for (k, v) in self {
			map.serialize_entry(k, v)?;
		}
		map.end()
	}
}

struct OrderedMapVisitor<K, V, C, S> {
	marker: PhantomData<fn() -> OrderedMap<K, V, C, S>>,
}

impl<'de, K, V, C, S: SlabMut<Node<(K, V)>>> Visitor<'de> for OrderedMapVisitor<K, V, C, S>
where
	K: Deserialize<'de>,
	V: Deserialize<'de>,
	C: Compare<K> + Default,
	S: Default + SimpleCollectionRef + SimpleCollectionMut,
{
	type Value = OrderedMap<K, V, C, S>;

	fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
		formatter.write_str("a map")
	}

	fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
	where
		M: MapAccess<'de>,
	{
		let mut map = OrderedMap::with_comparator(C::default());
		while let Some((key, value)) = access.next_entry()? {
			map.insert_or_replace(key, value);
		}

		Ok(map)
	}
}

impl<'de, K, V, C, S: SlabMut<Node<(K, V)>>> Deserialize<'de> for OrderedMap<K, V, C, S>
where
	K: Deserialize<'de>,
	V: Deserialize<'de>,
	C: Compare<K> + Default,
	S: Default + SimpleCollectionRef + SimpleCollectionMut,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_map(OrderedMapVisitor { marker: PhantomData })
	}
}

impl<T: Serialize, C, S: Slab<Node<(T, ())>>> Serialize for OrderedSet<T, C, S>
where
	S: SimpleCollectionRef,
{
	fn serialize<Z: Serializer>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> {
		let mut seq = serializer.serialize_seq(Some(self.len()))?;
		for t in self {
			seq.serialize_element(t)?;
		}
		seq.end()
	}
}

struct OrderedSetVisitor<T, C, S> {
	marker: PhantomData<fn() -> OrderedSet<T, C, S>>,
}

impl<'de, T, C, S: SlabMut<Node<(T, ())>>> Visitor<'de> for OrderedSetVisitor<T, C, S>
where
	T: Deserialize<'de>,
	C: Compare<T> + Default,
	S: Default + SimpleCollectionRef + SimpleCollectionMut,
{
	type Value = OrderedSet<T, C, S>;

	fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
		formatter.write_str("a sequence")
	}

	fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
	where
		A: SeqAccess<'de>,
	{
		let mut set = OrderedSet::with_comparator(C::default());
		while let Some(t) = access.next_element()? {
			set.insert(t);
		}

		Ok(set)
	}
}

impl<'de, T, C, S: SlabMut<Node<(T, ())>>> Deserialize<'de> for OrderedSet<T, C, S>
where
	T: Deserialize<'de>,
	C: Compare<T> + Default,
	S: Default + SimpleCollectionRef + SimpleCollectionMut,
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_seq(OrderedSetVisitor { marker: PhantomData })
	}
}
