use htom_bridge::kernel::wire::{decode_line, encode_line, CoreReply, CoreRequest, PROTOCOL_VERSION};
use htom_bridge::kernel::{Effect, Message};
use serde_json::{json, Value};
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;

struct Trace {
    file: Option<std::fs::File>,
}

impl Trace {
    fn from_env() -> Self {
        let path = std::env::var_os("HTOM_CORE_STUB_TRACE_PATH")
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        let file = path.and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });
        Self { file }
    }

    fn log(&mut self, line: &str) {
        let Some(file) = self.file.as_mut() else {
            return;
        };
        let _ = writeln!(file, "{line}");
        let _ = file.flush();
    }
}

/// `HTOM_CORE_STUB_KEYBOARD` is taken as JSON when it parses, else as a string.
fn keyboard_config() -> Value {
    match std::env::var("HTOM_CORE_STUB_KEYBOARD") {
        Ok(raw) => serde_json::from_str(&raw).unwrap_or(Value::String(raw)),
        Err(_) => json!("vim"),
    }
}

fn main() {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    let mut trace = Trace::from_env();
    let keyboard = keyboard_config();
    let emit_bogus = std::env::var_os("HTOM_CORE_STUB_BOGUS").is_some();
    let mut handler_sent = false;

    let ready = CoreReply::Ready {
        protocol: PROTOCOL_VERSION,
    };
    if send(&mut writer, &ready).is_err() {
        return;
    }

    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            break;
        };
        let reply = match decode_line::<CoreRequest>(&line) {
            Ok(CoreRequest::Initialize { geometry }) => {
                trace.log(&format!("initialize {}x{}", geometry.width, geometry.height));
                CoreReply::Effects {
                    effects: Vec::new(),
                }
            }
            Ok(CoreRequest::Send {
                message: Message::HtmlChanged(html),
            }) => {
                trace.log(&format!("html {html}"));
                let mut effects = Vec::new();
                if emit_bogus {
                    effects.push(Effect::Unknown {
                        kind: "bogus".to_string(),
                        fields: Default::default(),
                    });
                }
                if !handler_sent {
                    handler_sent = true;
                    effects.push(Effect::set_keyboard_handler(keyboard.clone()));
                }
                CoreReply::Effects { effects }
            }
            Err(e) => CoreReply::Error {
                message: e.to_string(),
            },
        };
        if send(&mut writer, &reply).is_err() {
            break;
        }
    }
}

fn send(writer: &mut impl Write, reply: &CoreReply) -> std::io::Result<()> {
    let bytes = encode_line(reply)?;
    writer.write_all(&bytes)?;
    writer.flush()
}
