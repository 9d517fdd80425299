//! Signature builder (C3): turns a method's control flow, data and package
//! references into canonical byte strings, per the levels in
//! `original_source/elsim/sign.py`.

pub mod grammar;

use std::collections::HashMap;

use crate::upstream::MethodView;

type MethodId = (String, String, String);

/// Selects which string-use code `L0`'s payload builder emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringStrategy {
    /// `S` per use.
    Plain,
    /// `S<len>` per use.
    WithLength,
}

/// Selects which package-access code `L0`'s payload builder emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageStrategy {
    /// `P0`/`P1`, undecorated, no internal-call downgrade.
    Plain,
    /// `pa_1`: internal calls downgrade to `P2`; matches decorated.
    Prefixed1,
    /// `pa_2`: no downgrade; non-matches decorated.
    Prefixed2,
}

/// Parameters for one `L0` emission, mirroring `SIGNATURES`'s `L0_0..L0_6`
/// entries in the original source.
#[derive(Debug, Clone)]
pub struct L0Spec {
    pub strings: StringStrategy,
    pub packages: PackageStrategy,
    pub include_prefixes: Vec<String>,
}

impl L0Spec {
    pub fn l0_0() -> Self {
        L0Spec { strings: StringStrategy::Plain, packages: PackageStrategy::Plain, include_prefixes: vec![] }
    }
    pub fn l0_1() -> Self {
        L0Spec { strings: StringStrategy::WithLength, packages: PackageStrategy::Plain, include_prefixes: vec![] }
    }
    pub fn l0_2() -> Self {
        L0Spec {
            strings: StringStrategy::Plain,
            packages: PackageStrategy::Prefixed1,
            include_prefixes: vec!["Landroid".to_string()],
        }
    }
    pub fn l0_3() -> Self {
        L0Spec {
            strings: StringStrategy::Plain,
            packages: PackageStrategy::Prefixed1,
            include_prefixes: vec!["Ljava".to_string()],
        }
    }
    /// The default used by the `Methods` filter preset (§4.5).
    pub fn l0_4() -> Self {
        L0Spec {
            strings: StringStrategy::Plain,
            packages: PackageStrategy::Prefixed1,
            include_prefixes: vec!["Landroid".to_string(), "Ljava".to_string()],
        }
    }
    pub fn l0_5() -> Self {
        L0Spec {
            strings: StringStrategy::Plain,
            packages: PackageStrategy::Prefixed2,
            include_prefixes: vec!["Landroid".to_string()],
        }
    }
    pub fn l0_6() -> Self {
        L0Spec {
            strings: StringStrategy::Plain,
            packages: PackageStrategy::Prefixed2,
            include_prefixes: vec!["Ljava".to_string()],
        }
    }

    fn cache_key(&self) -> String {
        format!("{:?}-{:?}-{}", self.strings, self.packages, self.include_prefixes.join(","))
    }
}

/// One signature level to compute and append, in the order given.
#[derive(Debug, Clone)]
pub enum Level {
    L0(L0Spec),
    L1,
    L2,
    L3,
    /// Arguments are the include-prefixes; always `pa_1`-decorated.
    L4(Vec<String>),
    Hex,
    SequenceBb { min_instructions: usize },
}

impl Level {
    fn label(&self) -> &'static str {
        match self {
            Level::L0(_) => "L0",
            Level::L1 => "L1",
            Level::L2 => "L2",
            Level::L3 => "L3",
            Level::L4(_) => "L4",
            Level::Hex => "hex",
            Level::SequenceBb { .. } => "sequencebb",
        }
    }

    fn cache_key(&self) -> String {
        match self {
            Level::L0(spec) => format!("L0:{}", spec.cache_key()),
            Level::L4(prefixes) => format!("L4:{}", prefixes.join(",")),
            Level::SequenceBb { min_instructions } => format!("sequencebb:{min_instructions}"),
            other => other.label().to_string(),
        }
    }
}

/// One level's computed value: either a concatenable string, or (only for
/// `sequencebb`) a list of per-block strings.
#[derive(Debug, Clone)]
pub enum LevelValue {
    Text(String),
    List(Vec<String>),
}

/// The signature for a single method: an ordered mapping from level label to
/// value, matching `Sign` in the original source.
#[derive(Debug, Clone, Default)]
pub struct Sign {
    levels: Vec<(String, LevelValue)>,
}

impl Sign {
    fn add(&mut self, label: &str, value: LevelValue) {
        self.levels.push((label.to_string(), value));
    }

    /// Concatenation of every `Text` level's value, in insertion order. This
    /// is the byte string the similarity kernel compresses.
    pub fn get_string(&self) -> String {
        self.levels
            .iter()
            .filter_map(|(_, v)| match v {
                LevelValue::Text(s) => Some(s.as_str()),
                LevelValue::List(_) => None,
            })
            .collect()
    }

    /// The `sequencebb` level's list, if present.
    pub fn get_list(&self) -> Option<&[String]> {
        self.levels.iter().find_map(|(label, v)| {
            if label == "sequencebb" {
                match v {
                    LevelValue::List(items) => Some(items.as_slice()),
                    LevelValue::Text(_) => None,
                }
            } else {
                None
            }
        })
    }
}

/// Builds and memoizes signatures for methods, per `(method identity,
/// grammar spec)`, and independently caches the per-method string/field/
/// package sub-lists (§4.3).
#[derive(Default)]
pub struct SignatureBuilder {
    signatures: HashMap<(MethodId, String), Sign>,
    strings_plain: HashMap<MethodId, Vec<(u32, String)>>,
    strings_with_len: HashMap<MethodId, Vec<(u32, String)>>,
    fields: HashMap<MethodId, Vec<(u32, String)>>,
    packages: HashMap<(MethodId, String), Vec<(u32, String)>>,
}

impl SignatureBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn strings_for(&mut self, method: &dyn MethodView, strategy: StringStrategy) -> Vec<(u32, String)> {
        let id = method.identity();
        let cache = match strategy {
            StringStrategy::Plain => &mut self.strings_plain,
            StringStrategy::WithLength => &mut self.strings_with_len,
        };
        if let Some(cached) = cache.get(&id) {
            return cached.clone();
        }
        let value = match strategy {
            StringStrategy::Plain => grammar::strings_plain(method),
            StringStrategy::WithLength => grammar::strings_with_length(method),
        };
        cache.insert(id, value.clone());
        value
    }

    fn fields_for(&mut self, method: &dyn MethodView) -> Vec<(u32, String)> {
        let id = method.identity();
        if let Some(cached) = self.fields.get(&id) {
            return cached.clone();
        }
        let value = grammar::fields_plain(method);
        self.fields.insert(id, value.clone());
        value
    }

    fn packages_for(
        &mut self,
        method: &dyn MethodView,
        strategy: PackageStrategy,
        prefixes: &[String],
    ) -> Vec<(u32, String)> {
        let id = method.identity();
        let key = (id, format!("{strategy:?}-{}", prefixes.join(",")));
        if let Some(cached) = self.packages.get(&key) {
            return cached.clone();
        }
        let value = match strategy {
            PackageStrategy::Plain => grammar::packages_plain(method),
            PackageStrategy::Prefixed1 => grammar::packages_prefixed1(method, prefixes),
            PackageStrategy::Prefixed2 => grammar::packages_prefixed2(method, prefixes),
        };
        self.packages.insert(key, value.clone());
        value
    }

    fn compute_l0(&mut self, method: &dyn MethodView, spec: &L0Spec) -> String {
        let strings = self.strings_for(method, spec.strings);
        let fields = self.fields_for(method);
        let packages = self.packages_for(method, spec.packages, &spec.include_prefixes);
        let outputs = grammar::SubStrategyOutputs { strings, fields, packages };
        grammar::basic_block_payload(method, &outputs)
    }

    /// Computes (or returns the memoized) [`Sign`] for `method` under the
    /// given level composition.
    pub fn get_method_signature(&mut self, method: &dyn MethodView, levels: &[Level]) -> Sign {
        let id = method.identity();
        let key = levels.iter().map(Level::cache_key).collect::<Vec<_>>().join(":");
        let cache_key = (id, key);
        if let Some(cached) = self.signatures.get(&cache_key) {
            return cached.clone();
        }

        let mut sign = Sign::default();
        for level in levels {
            match level {
                Level::L0(spec) => {
                    let value = self.compute_l0(method, spec);
                    sign.add("L0", LevelValue::Text(value));
                }
                Level::L1 => sign.add("L1", LevelValue::Text(grammar::strings_concat(method))),
                Level::L2 => sign.add("L2", LevelValue::Text(grammar::exceptions_concat(method))),
                Level::L3 => sign.add("L3", LevelValue::Text(grammar::fill_array_data_hex(method))),
                Level::L4(prefixes) => {
                    sign.add("L4", LevelValue::Text(grammar::packages_joined(method, prefixes)))
                }
                Level::Hex => sign.add("hex", LevelValue::Text(grammar::hex_dump(method))),
                Level::SequenceBb { min_instructions } => {
                    sign.add("sequencebb", LevelValue::List(grammar::sequence_bb(method, *min_instructions)))
                }
            }
        }

        self.signatures.insert(cache_key, sign.clone());
        sign
    }
}
