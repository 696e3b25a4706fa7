use std::{
    borrow::Cow,
    collections::{HashMap, HashSet},
    convert::{TryFrom, TryInto},
};

use anyhow::Context;

/// One JSON object flattened into typed values. Getters record which keys were read so
/// leftovers can be reported with `check_unused_keys`.
pub struct InputParams {
    params: HashMap<String, InputParamsValue>,
    name: Cow<'static, str>,
    visited_names: HashSet<String>,
}

pub enum InputParamsValue {
    Int(i32),
    Float(f32),
    Bool(bool),
    String(String),
    Array(Vec<InputParamsValue>),
}

impl InputParamsValue {
    fn as_float(&self) -> Option<f32> {
        match self {
            InputParamsValue::Float(v) => Some(*v),
            InputParamsValue::Int(v) => Some(*v as f32),
            _ => None,
        }
    }
}

macro_rules! params_get {
    ( $( ( $name:ident, $type:ty, $variant:ident, $hint:expr ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                #[allow(dead_code)]
                pub fn [<get_ $name>](&mut self, key: &str) -> anyhow::Result<$type> {
                    if let Some(value) = self.params.get(key) {
                        if let InputParamsValue::$variant(value) = value {
                            self.visited_names.insert(key.to_owned());
                            return Ok(*value);
                        }
                        anyhow::bail!(format!("{} - '{}' should be {}", self.name, key, $hint));
                    }
                    anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
                }

                #[allow(dead_code)]
                pub fn [<get_ $name _or>](&mut self, key: &str, fallback: $type) -> anyhow::Result<$type> {
                    if self.params.contains_key(key) {
                        self.[<get_ $name>](key)
                    } else {
                        Ok(fallback)
                    }
                }
            }
        )+
    };
}

impl InputParams {
    pub fn set_name(&mut self, name: Cow<'static, str>) {
        self.name = name;
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    params_get! {
        (int, i32, Int, "integer"),
        (bool, bool, Bool, "boolean"),
    }

    /// Integers are accepted where a float is expected, JSON writers rarely keep `1.0`.
    pub fn get_float(&mut self, key: &str) -> anyhow::Result<f32> {
        if let Some(value) = self.params.get(key) {
            if let Some(value) = value.as_float() {
                self.visited_names.insert(key.to_owned());
                return Ok(value);
            }
            anyhow::bail!(format!("{} - '{}' should be float", self.name, key));
        }
        anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
    }

    pub fn get_float_or(&mut self, key: &str, fallback: f32) -> anyhow::Result<f32> {
        if self.params.contains_key(key) {
            self.get_float(key)
        } else {
            Ok(fallback)
        }
    }

    pub fn get_float3(&mut self, key: &str) -> anyhow::Result<[f32; 3]> {
        if let Some(value) = self.params.get(key) {
            let error_info = format!("{} - '{}' should be array with 3 floats", self.name, key);
            if let InputParamsValue::Array(arr) = value {
                if arr.len() == 3 {
                    let mut result = [0.0; 3];
                    for (i, ele) in arr.iter().enumerate() {
                        result[i] = ele.as_float().context(error_info.clone())?;
                    }
                    self.visited_names.insert(key.to_owned());
                    return Ok(result);
                }
            }
            anyhow::bail!(error_info);
        }
        anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
    }

    pub fn get_float3_or(&mut self, key: &str, fallback: [f32; 3]) -> anyhow::Result<[f32; 3]> {
        if self.params.contains_key(key) {
            self.get_float3(key)
        } else {
            Ok(fallback)
        }
    }

    pub fn get_str(&mut self, key: &str) -> anyhow::Result<String> {
        if let Some(value) = self.params.get(key) {
            if let InputParamsValue::String(value) = value {
                self.visited_names.insert(key.to_owned());
                return Ok(value.clone());
            }
            anyhow::bail!(format!("{} - '{}' should be string", self.name, key));
        }
        anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
    }

    pub fn get_str_or(&mut self, key: &str, fallback: &str) -> anyhow::Result<String> {
        if self.params.contains_key(key) {
            self.get_str(key)
        } else {
            Ok(fallback.to_owned())
        }
    }

    /// Non-negative integer, used for counts and depths.
    pub fn get_count_or(&mut self, key: &str, fallback: u32) -> anyhow::Result<u32> {
        let value = self.get_int_or(key, fallback as i32)?;
        if value < 0 {
            anyhow::bail!(format!("{} - '{}' should be non-negative", self.name, key));
        }
        Ok(value as u32)
    }

    pub fn check_unused_keys(&self) {
        for k in self.params.keys() {
            if !k.starts_with('#') && !self.visited_names.contains(k) {
                log::warn!("{} - unused key '{}'", self.name, k);
            }
        }
    }
}

impl TryFrom<&serde_json::Value> for InputParamsValue {
    type Error = anyhow::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => {
                anyhow::bail!("can't convert to InputParamsValue from null json")
            }
            serde_json::Value::Bool(v) => Ok(Self::Bool(*v)),
            serde_json::Value::Number(v) => {
                if let Some(v) = v.as_i64() {
                    Ok(Self::Int(v as i32))
                } else {
                    let v = v
                        .as_f64()
                        .context("can't convert json number to float")?;
                    Ok(Self::Float(v as f32))
                }
            }
            serde_json::Value::String(v) => Ok(Self::String(v.clone())),
            serde_json::Value::Array(arr) => {
                let mut values = Vec::<InputParamsValue>::with_capacity(arr.len());
                for v in arr {
                    match v.try_into() {
                        Ok(v) => values.push(v),
                        Err(e) => {
                            anyhow::bail!(format!("can't convert array element: {}", e))
                        }
                    }
                }
                Ok(Self::Array(values))
            }
            serde_json::Value::Object(_) => {
                anyhow::bail!("can't convert to InputParamsValue from object json")
            }
        }
    }
}

impl TryFrom<&serde_json::Value> for InputParams {
    type Error = anyhow::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        if let serde_json::Value::Object(value) = value {
            let mut params = HashMap::<String, InputParamsValue>::with_capacity(value.len());
            for (k, v) in value {
                match v.try_into() {
                    Ok(v) => {
                        params.insert(k.clone(), v);
                    }
                    Err(e) => {
                        anyhow::bail!(format!("can't convert member '{}': {}", k, e))
                    }
                }
            }
            Ok(Self {
                params,
                name: Cow::Owned("".to_owned()),
                visited_names: HashSet::new(),
            })
        } else {
            anyhow::bail!("can't convert to InputParams from non-object json value");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(json: &str) -> InputParams {
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        (&value).try_into().unwrap()
    }

    #[test]
    fn typed_getters() {
        let mut p = params(r#"{ "a": 1, "b": 2.5, "c": [1, 2.0, 3], "d": "x", "e": true }"#);
        assert_eq!(p.get_int("a").unwrap(), 1);
        assert_eq!(p.get_float("a").unwrap(), 1.0);
        assert_eq!(p.get_float("b").unwrap(), 2.5);
        assert_eq!(p.get_float3("c").unwrap(), [1.0, 2.0, 3.0]);
        assert_eq!(p.get_str("d").unwrap(), "x");
        assert!(p.get_bool("e").unwrap());
        assert!(p.get_int("b").is_err());
        assert!(p.get_str("missing").is_err());
    }

    #[test]
    fn fallback_only_when_absent() {
        let mut p = params(r#"{ "n": -1, "s": 4 }"#);
        assert_eq!(p.get_float_or("missing", 0.5).unwrap(), 0.5);
        assert_eq!(p.get_count_or("s", 1).unwrap(), 4);
        assert!(p.get_count_or("n", 1).is_err());
        assert!(p.get_str_or("s", "fallback").is_err());
    }
}
