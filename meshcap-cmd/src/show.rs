use std::{
    fs::File,
    io::{stdin, stdout, BufRead, BufReader, Write},
    path::Path,
};

use anyhow::{Context, Result};
use handlebars::Handlebars;
use meshcap::{Decoder, FlatRecord, Record};

#[derive(Debug, Clone)]
pub enum Format {
    Json,
    Text,
}

impl clap::ValueEnum for Format {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Json, Self::Text]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            Self::Json => Some(clap::builder::PossibleValue::new("json")),
            Self::Text => Some(clap::builder::PossibleValue::new("text")),
        }
    }
}

/// Renders one line per record.
pub struct Printer {
    format: Format,
    hb: Handlebars<'static>,
}

impl Printer {
    pub fn new(format: Format) -> Result<Self> {
        let mut hb = Handlebars::new();
        hb.register_escape_fn(handlebars::no_escape);
        hb.register_template_string("record", TEXT_TEMPLATE)
            .context("registering text template")?;
        Ok(Printer { format, hb })
    }

    pub fn render(&self, record: &Record) -> Result<String> {
        let flat = FlatRecord::from(record);
        match self.format {
            Format::Json => serde_json::to_string(&flat).context("serializing to json"),
            Format::Text => {
                let text = self.hb.render("record", &flat).context("rendering text")?;
                Ok(text.replace(&['\r', '\n'][..], " "))
            }
        }
    }

    pub fn print<W: Write>(&self, mut dest: W, record: &Record) -> Result<()> {
        let line = self.render(record)?;
        writeln!(dest, "{line}").context("writing record")
    }
}

/// Print every record in a capture file, or stdin when `input` is `-`.
pub fn show(input: &Path, format: Format) -> Result<()> {
    let reader: Box<dyn BufRead> = if input == Path::new("-") {
        Box::new(stdin().lock())
    } else {
        let file = File::open(input).with_context(|| format!("opening input {input:?}"))?;
        Box::new(BufReader::new(file))
    };
    let printer = Printer::new(format)?;
    let decoder = Decoder::default();
    let mut out = stdout().lock();

    for (idx, line) in crate::decode::lossy_lines(reader).enumerate() {
        let line = line.context("reading input")?;
        if meshcap::capture::is_blank(&line) {
            continue;
        }
        printer.print(&mut out, &decoder.decode_line(idx + 1, &line))?;
    }

    Ok(())
}

const TEXT_TEMPLATE: &str = "{{ Timestamp }} {{ Topic }}\
{{ #if MessageType }} {{ MessageType }}{{ /if }}\
{{ #if From }} from={{ From }} to={{ To }} id={{ PacketID }}{{ /if }}\
{{ #if PayloadType }} {{ PayloadType }}{{ /if }}\
{{ #if PortnumName }} {{ PortnumName }}{{ /if }}\
{{ #if TextMessage }} text={{ TextMessage }}{{ /if }}\
{{ #if Latitude }} pos={{ Latitude }},{{ Longitude }}{{ /if }}\
{{ #if UserLongName }} user={{ UserLongName }} ({{ UserShortName }}){{ /if }}\
{{ #if BatteryLevel }} battery={{ BatteryLevel }} voltage={{ Voltage }}{{ /if }}\
{{ #if Temperature }} temp={{ Temperature }}{{ /if }}\
{{ #if MapLongName }} map={{ MapLongName }} ({{ MapShortName }}) {{ MapRole }}{{ /if }}\
{{ #if WaypointName }} waypoint={{ WaypointName }}{{ /if }}\
{{ #if RoutingVariant }} routing={{ RoutingVariant }} {{ RoutingErrorReason }}{{ /if }}\
{{ #if HwType }} hw={{ HwType }}{{ /if }}\
{{ #if Error }} error={{ Error }}{{ /if }}";
