//! Audio settings for toast templates

use std::fmt;
use std::str::FromStr;

/// How the notification sound is played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioOption {
    #[default]
    Default,
    Silent,
    Loop,
}

impl AudioOption {
    /// Map the numeric audio state used on the command line (0, 1, 2)
    pub const fn from_state(state: u8) -> Option<Self> {
        match state {
            0 => Some(Self::Default),
            1 => Some(Self::Silent),
            2 => Some(Self::Loop),
            _ => None,
        }
    }
}

/// Named system sounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioSystemFile {
    DefaultSound,
    IM,
    Mail,
    Reminder,
    SMS,
    Alarm,
    Alarm2,
    Alarm3,
    Alarm4,
    Alarm5,
    Alarm6,
    Alarm7,
    Alarm8,
    Alarm9,
    Alarm10,
    Call,
    Call1,
    Call2,
    Call3,
    Call4,
    Call5,
    Call6,
    Call7,
    Call8,
    Call9,
    Call10,
}

impl AudioSystemFile {
    /// The `ms-winsoundevent:` URI for this sound
    pub const fn uri(&self) -> &'static str {
        match self {
            Self::DefaultSound => "ms-winsoundevent:Notification.Default",
            Self::IM => "ms-winsoundevent:Notification.IM",
            Self::Mail => "ms-winsoundevent:Notification.Mail",
            Self::Reminder => "ms-winsoundevent:Notification.Reminder",
            Self::SMS => "ms-winsoundevent:Notification.SMS",
            Self::Alarm => "ms-winsoundevent:Notification.Looping.Alarm",
            Self::Alarm2 => "ms-winsoundevent:Notification.Looping.Alarm2",
            Self::Alarm3 => "ms-winsoundevent:Notification.Looping.Alarm3",
            Self::Alarm4 => "ms-winsoundevent:Notification.Looping.Alarm4",
            Self::Alarm5 => "ms-winsoundevent:Notification.Looping.Alarm5",
            Self::Alarm6 => "ms-winsoundevent:Notification.Looping.Alarm6",
            Self::Alarm7 => "ms-winsoundevent:Notification.Looping.Alarm7",
            Self::Alarm8 => "ms-winsoundevent:Notification.Looping.Alarm8",
            Self::Alarm9 => "ms-winsoundevent:Notification.Looping.Alarm9",
            Self::Alarm10 => "ms-winsoundevent:Notification.Looping.Alarm10",
            Self::Call => "ms-winsoundevent:Notification.Looping.Call",
            Self::Call1 => "ms-winsoundevent:Notification.Looping.Call1",
            Self::Call2 => "ms-winsoundevent:Notification.Looping.Call2",
            Self::Call3 => "ms-winsoundevent:Notification.Looping.Call3",
            Self::Call4 => "ms-winsoundevent:Notification.Looping.Call4",
            Self::Call5 => "ms-winsoundevent:Notification.Looping.Call5",
            Self::Call6 => "ms-winsoundevent:Notification.Looping.Call6",
            Self::Call7 => "ms-winsoundevent:Notification.Looping.Call7",
            Self::Call8 => "ms-winsoundevent:Notification.Looping.Call8",
            Self::Call9 => "ms-winsoundevent:Notification.Looping.Call9",
            Self::Call10 => "ms-winsoundevent:Notification.Looping.Call10",
        }
    }
}

/// Toast display duration class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastDuration {
    /// Let the OS decide
    #[default]
    System,
    Short,
    Long,
}

/// Toast scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scenario {
    #[default]
    Default,
    Alarm,
    IncomingCall,
    Reminder,
}

impl Scenario {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Alarm => "Alarm",
            Self::IncomingCall => "IncomingCall",
            Self::Reminder => "Reminder",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "alarm" => Ok(Self::Alarm),
            "incomingcall" | "incoming-call" => Ok(Self::IncomingCall),
            "reminder" => Ok(Self::Reminder),
            _ => Err(format!("Invalid scenario: \"{}\"", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_sound_uris() {
        assert_eq!(
            AudioSystemFile::DefaultSound.uri(),
            "ms-winsoundevent:Notification.Default"
        );
        assert_eq!(
            AudioSystemFile::Call10.uri(),
            "ms-winsoundevent:Notification.Looping.Call10"
        );
        assert_eq!(
            AudioSystemFile::Alarm.uri(),
            "ms-winsoundevent:Notification.Looping.Alarm"
        );
    }

    #[test]
    fn audio_state_mapping() {
        assert_eq!(AudioOption::from_state(0), Some(AudioOption::Default));
        assert_eq!(AudioOption::from_state(1), Some(AudioOption::Silent));
        assert_eq!(AudioOption::from_state(2), Some(AudioOption::Loop));
        assert_eq!(AudioOption::from_state(3), None);
    }

    #[test]
    fn scenario_parse_and_display() {
        assert_eq!("IncomingCall".parse::<Scenario>(), Ok(Scenario::IncomingCall));
        assert_eq!(Scenario::Reminder.to_string(), "Reminder");
        assert!("nope".parse::<Scenario>().is_err());
    }
}
