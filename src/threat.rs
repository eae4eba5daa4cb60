use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatType {
    Malware,
    SocialEngineering,
    UnwantedSoftware,
    PotentiallyHarmfulApplication,
    #[serde(other)]
    ThreatTypeUnspecified,
}

impl fmt::Display for ThreatType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::Malware => "MALWARE",
            Self::SocialEngineering => "SOCIAL_ENGINEERING",
            Self::UnwantedSoftware => "UNWANTED_SOFTWARE",
            Self::PotentiallyHarmfulApplication => "POTENTIALLY_HARMFUL_APPLICATION",
            Self::ThreatTypeUnspecified => "THREAT_TYPE_UNSPECIFIED",
        };

        write!(f, "{name}")
    }
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlatformType {
    AnyPlatform,
    AllPlatforms,
    Windows,
    Linux,
    Osx,
    Android,
    Ios,
    Chrome,
    #[serde(other)]
    PlatformTypeUnspecified,
}

impl fmt::Display for PlatformType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::AnyPlatform => "ANY_PLATFORM",
            Self::AllPlatforms => "ALL_PLATFORMS",
            Self::Windows => "WINDOWS",
            Self::Linux => "LINUX",
            Self::Osx => "OSX",
            Self::Android => "ANDROID",
            Self::Ios => "IOS",
            Self::Chrome => "CHROME",
            Self::PlatformTypeUnspecified => "PLATFORM_TYPE_UNSPECIFIED",
        };

        write!(f, "{name}")
    }
}

// The Lookup API reports URL entries as "URL", older clients name them "URL_EXPRESSION".
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub enum ThreatEntryType {
    #[serde(rename = "URL", alias = "URL_EXPRESSION")]
    UrlExpression,
    #[serde(rename = "EXECUTABLE")]
    Executable,
    #[serde(rename = "IP_RANGE")]
    IpRange,
    #[serde(rename = "THREAT_ENTRY_TYPE_UNSPECIFIED")]
    #[serde(other)]
    ThreatEntryTypeUnspecified,
}

impl fmt::Display for ThreatEntryType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Self::UrlExpression => "URL_EXPRESSION",
            Self::Executable => "EXECUTABLE",
            Self::IpRange => "IP_RANGE",
            Self::ThreatEntryTypeUnspecified => "THREAT_ENTRY_TYPE_UNSPECIFIED",
        };

        write!(f, "{name}")
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ThreatDescriptor {
    pub threat_type: ThreatType,
    pub platform_type: PlatformType,
    pub threat_entry_type: ThreatEntryType,
}

impl fmt::Display for ThreatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{} {} {}}}", self.threat_type, self.platform_type, self.threat_entry_type)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ThreatMatch {
    pub pattern: String,
    pub descriptor: ThreatDescriptor,
}

impl ThreatMatch {
    pub fn new(url: &str, descriptor: ThreatDescriptor) -> Self {
        Self {
            pattern: pattern_for(url),
            descriptor,
        }
    }
}

impl fmt::Display for ThreatMatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{{} {}}}", self.pattern, self.descriptor)
    }
}

pub struct ThreatMatches<'a>(pub &'a [ThreatMatch]);

impl<'a> fmt::Display for ThreatMatches<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rendered = self.0
            .iter()
            .map(|threat_match| threat_match.to_string())
            .collect::<Vec<String>>()
            .join(" ");

        write!(f, "[{rendered}]")
    }
}




fn pattern_for(url: &str) -> String {
    let parsed = if url.contains("://") {
        Url::parse(url).ok()
    } else {
        Url::parse(&format!("http://{url}")).ok()
    };

    match parsed.as_ref().and_then(|parsed| parsed.host_str().map(|host| (parsed, host))) {
        Some((parsed, host)) => {
            let mut pattern = String::from(host);

            if parsed.path() != "/" {
                pattern.push_str(parsed.path());
            }

            if let Some(query) = parsed.query() {
                pattern.push('?');
                pattern.push_str(query);
            }

            pattern
        },
        None => url.into(),
    }
}
