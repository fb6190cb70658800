//! Convert a document between JSON and property-list codec variants.
//!
//! Usage:
//!   codecap-convert --from json:json5 --to plist:binary settings.json5 -o settings.plist
//!   codecap-convert --from plist --to json:pretty < settings.plist
//!   codecap-convert --list
//!
//! The document is decoded into an untyped value, so anything the two codecs
//! can both represent survives the trip. Non-finite reals are rejected while
//! decoding because JSON has no spelling for them.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use codecap::file::{read_all, write_all};
use codecap::{
    Format, JsonDecoders, JsonEncoders, MultiJsonDecodable, MultiJsonEncodable, MultiPlistDecodable,
    MultiPlistEncodable, PlistDecoders, PlistEncoders, Selector,
};
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::fmt;
use std::io::{Read, Write, stdin, stdout};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "codecap-convert")]
#[command(about = "Convert documents between JSON and property-list variants")]
struct Cli {
    /// Input codec as FORMAT[:VARIANT], e.g. json, json:json5, plist.
    #[arg(long, default_value = "json")]
    from: String,
    /// Output codec as FORMAT[:VARIANT], e.g. json:pretty, plist:binary.
    #[arg(long, default_value = "json")]
    to: String,
    /// Output file; writes stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Print every format and variant, then exit.
    #[arg(long)]
    list: bool,
    /// Input file; reads stdin when omitted.
    input: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
struct Document(Value);

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DocumentVisitor).map(Document)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a document value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Number::from_f64(v)
            .map(Value::Number)
            .ok_or_else(|| E::custom(format!("non-finite number {v}")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Document::deserialize(deserializer).map(|document| document.0)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::new();
        while let Some(Document(item)) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Value, A::Error> {
        let mut object = Map::new();
        while let Some((key, Document(value))) = map.next_entry::<String, Document>()? {
            object.insert(key, value);
        }
        Ok(Value::Object(object))
    }
}

impl MultiJsonDecodable for Document {
    type JsonDecoders = JsonDecoders;
}

impl MultiJsonEncodable for Document {
    type JsonEncoders = JsonEncoders;
}

impl MultiPlistDecodable for Document {
    type PlistDecoders = PlistDecoders;
}

impl MultiPlistEncodable for Document {
    type PlistEncoders = PlistEncoders;
}

struct CodecSpec {
    format: Format,
    variant: Option<String>,
}

impl CodecSpec {
    fn parse(raw: &str) -> Result<Self> {
        let (format, variant) = match raw.split_once(':') {
            Some((format, variant)) => (format, Some(variant.to_string())),
            None => (raw, None),
        };
        let format = Format::try_from(format)?;
        Ok(Self { format, variant })
    }

    fn variant_or<S: Selector>(&self, fallback: S) -> Result<S> {
        let Some(name) = self.variant.as_deref() else {
            return Ok(fallback);
        };
        S::from_name(name).ok_or_else(|| {
            anyhow!(
                "unknown {} variant '{name}'; expected one of {}",
                self.format,
                S::names().join(", ")
            )
        })
    }
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if cli.list {
        print_variants();
        return Ok(());
    }

    let from = CodecSpec::parse(&cli.from).with_context(|| format!("parsing --from {}", cli.from))?;
    let to = CodecSpec::parse(&cli.to).with_context(|| format!("parsing --to {}", cli.to))?;

    let input = read_input(cli.input.as_ref())?;
    let document = decode(&from, &input)?;
    let output = encode(&to, &document)?;
    write_output(cli.output.as_ref(), &output)
}

fn decode(spec: &CodecSpec, bytes: &[u8]) -> Result<Document> {
    match spec.format {
        Format::Json => {
            let using = spec.variant_or(JsonDecoders::Base)?;
            Document::from_json_using(bytes, using)
                .with_context(|| format!("decoding input as json:{using}"))
        }
        Format::Plist => {
            let using = spec.variant_or(PlistDecoders::Base)?;
            Document::from_plist_using(bytes, using)
                .with_context(|| format!("decoding input as plist:{using}"))
        }
    }
}

fn encode(spec: &CodecSpec, document: &Document) -> Result<Vec<u8>> {
    match spec.format {
        Format::Json => {
            let using = spec.variant_or(JsonEncoders::Base)?;
            document
                .to_json_using(using)
                .with_context(|| format!("encoding output as json:{using}"))
        }
        Format::Plist => {
            let using = spec.variant_or(PlistEncoders::Xml)?;
            document
                .to_plist_using(using)
                .with_context(|| format!("encoding output as plist:{using}"))
        }
    }
}

fn read_input(path: Option<&PathBuf>) -> Result<Vec<u8>> {
    match path {
        Some(path) => Ok(read_all(path)?),
        None => {
            let mut buf = Vec::new();
            stdin()
                .read_to_end(&mut buf)
                .context("reading stdin for input document")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&PathBuf>, bytes: &[u8]) -> Result<()> {
    match path {
        Some(path) => Ok(write_all(path, bytes)?),
        None => {
            let mut out = stdout().lock();
            out.write_all(bytes).context("writing output to stdout")?;
            out.flush().context("flushing stdout")
        }
    }
}

fn print_variants() {
    println!("json decoders: {}", JsonDecoders::names().join(", "));
    println!("json encoders: {}", JsonEncoders::names().join(", "));
    println!("plist decoders: {}", PlistDecoders::names().join(", "));
    println!("plist encoders: {}", PlistEncoders::names().join(", "));
}
