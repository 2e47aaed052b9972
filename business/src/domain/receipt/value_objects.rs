use serde::{Deserialize, Serialize};

/// Input surface an image was acquired from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageOrigin {
    Camera,
    File,
}

impl std::fmt::Display for ImageOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageOrigin::Camera => write!(f, "camera"),
            ImageOrigin::File => write!(f, "file"),
        }
    }
}

impl std::str::FromStr for ImageOrigin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "camera" => Ok(ImageOrigin::Camera),
            "file" => Ok(ImageOrigin::File),
            _ => Err(format!("Invalid image origin: {}", s)),
        }
    }
}

/// How strictly numeric fields are validated during normalization.
///
/// `Lenient` masks every malformed amount with `0`. `Strict` rejects amounts
/// that are present but cannot be read as a non-negative number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    #[default]
    Lenient,
    Strict,
}

impl std::fmt::Display for Strictness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strictness::Lenient => write!(f, "lenient"),
            Strictness::Strict => write!(f, "strict"),
        }
    }
}

impl std::str::FromStr for Strictness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lenient" => Ok(Strictness::Lenient),
            "strict" => Ok(Strictness::Strict),
            _ => Err(format!("Invalid strictness level: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_image_origin_from_display_form() {
        for origin in [ImageOrigin::Camera, ImageOrigin::File] {
            assert_eq!(origin.to_string().parse::<ImageOrigin>(), Ok(origin));
        }
    }

    #[test]
    fn should_reject_unknown_image_origin() {
        assert!("scanner".parse::<ImageOrigin>().is_err());
    }

    #[test]
    fn should_default_to_lenient_strictness() {
        assert_eq!(Strictness::default(), Strictness::Lenient);
        assert_eq!("strict".parse::<Strictness>(), Ok(Strictness::Strict));
    }
}
