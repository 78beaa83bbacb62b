use std::fs;
use std::path::{Path, PathBuf};

use acnpdu_core::{MessageSpec, encode_message};

fn main() -> Result<(), String> {
    let root = PathBuf::from("tests/golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        let message = path.join("message.json");
        if !path.is_dir() || !message.exists() {
            continue;
        }
        write_frame(&message, &path.join("frame.hex"))?;
    }
    Ok(())
}

fn write_frame(message: &Path, output: &Path) -> Result<(), String> {
    let json = fs::read_to_string(message)
        .map_err(|err| format!("failed to read {}: {}", message.display(), err))?;
    let spec: MessageSpec = serde_json::from_str(&json)
        .map_err(|err| format!("invalid message {}: {}", message.display(), err))?;
    let frame = encode_message(&spec)
        .map_err(|err| format!("encode failed for {}: {}", message.display(), err))?;
    fs::write(output, format!("{}\n", hex::encode(&frame)))
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
