use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, Error, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::{NdArray, Shape};

const FIELDS: &[&str] = &["shape", "data"];

impl<T: Serialize> Serialize for NdArray<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let shape = self.shape();
        let mut array = serializer.serialize_struct("NdArray", 2)?;
        array.serialize_field("shape", &[shape.rows, shape.cols])?;
        array.serialize_field("data", self.data())?;
        array.end()
    }
}

struct ArrayVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for ArrayVisitor<T> {
    type Value = NdArray<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "an array with \"shape\" and \"data\" fields")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut data: Option<Vec<T>> = None;
        let mut shape: Option<Vec<usize>> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "data" => {
                    if data.is_some() {
                        return Err(A::Error::duplicate_field("data"));
                    }
                    data = Some(map.next_value()?);
                }
                "shape" => {
                    if shape.is_some() {
                        return Err(A::Error::duplicate_field("shape"));
                    }
                    shape = Some(map.next_value()?);
                }
                _ => {
                    return Err(A::Error::unknown_field(&key, FIELDS));
                }
            }
        }

        let Some(shape) = shape else {
            return Err(A::Error::missing_field("shape"));
        };
        let Some(data) = data else {
            return Err(A::Error::missing_field("data"));
        };

        let &[rows, cols] = shape.as_slice() else {
            return Err(A::Error::custom("incorrect shape length for array"));
        };

        NdArray::from_data(Shape::new(rows, cols), data)
            .map_err(|_| A::Error::custom("data length does not match shape product"))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NdArray<T> {
    fn deserialize<D>(deserializer: D) -> Result<NdArray<T>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_struct(
            "NdArray",
            FIELDS,
            ArrayVisitor::<T> {
                marker: PhantomData,
            },
        )
    }
}
