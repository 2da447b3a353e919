//! Hub calls — the hub's capability-specific command vocabulary.

use std::fmt;

use crate::id::DeviceId;

/// One command the hub understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubCommand {
    On,
    Off,
    SetLevel(u8),
    SetColor { hue: u8, saturation: u8 },
    SetColorTemperature(u32),
}

impl HubCommand {
    /// The hub's command name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
            Self::SetLevel(_) => "setLevel",
            Self::SetColor { .. } => "setColor",
            Self::SetColorTemperature(_) => "setColorTemperature",
        }
    }

    /// Positional arguments, unencoded.
    ///
    /// `setColor` takes a single JSON object argument.
    #[must_use]
    pub fn arguments(&self) -> Vec<String> {
        match self {
            Self::On | Self::Off => Vec::new(),
            Self::SetLevel(level) => vec![level.to_string()],
            Self::SetColor { hue, saturation } => {
                vec![serde_json::json!({ "hue": hue, "saturation": saturation }).to_string()]
            }
            Self::SetColorTemperature(kelvin) => vec![kelvin.to_string()],
        }
    }
}

impl fmt::Display for HubCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        let arguments = self.arguments();
        if !arguments.is_empty() {
            write!(f, "({})", arguments.join(", "))?;
        }
        Ok(())
    }
}

/// A command addressed to one hub device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubCall {
    pub device_id: DeviceId,
    pub command: HubCommand,
}

impl HubCall {
    #[must_use]
    pub fn new(device_id: impl Into<DeviceId>, command: HubCommand) -> Self {
        Self {
            device_id: device_id.into(),
            command,
        }
    }
}

impl fmt::Display for HubCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.device_id, self.command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_name_commands_as_hub_expects() {
        assert_eq!(HubCommand::SetLevel(10).name(), "setLevel");
        assert_eq!(
            HubCommand::SetColorTemperature(2700).name(),
            "setColorTemperature"
        );
    }

    #[test]
    fn should_encode_set_color_as_single_json_argument() {
        let command = HubCommand::SetColor {
            hue: 10,
            saturation: 20,
        };
        assert_eq!(command.arguments(), vec![r#"{"hue":10,"saturation":20}"#]);
    }

    #[test]
    fn should_have_no_arguments_for_on_off() {
        assert!(HubCommand::On.arguments().is_empty());
        assert!(HubCommand::Off.arguments().is_empty());
    }

    #[test]
    fn should_display_call_with_arguments() {
        let call = HubCall::new("12", HubCommand::SetLevel(50));
        assert_eq!(call.to_string(), "12 -> setLevel(50)");
    }
}
