//! Fixed example listing used by the demo command and the sample route.

use super::profile::{PageProfile, PageSubmission};

pub const SAMPLE_URL: &str =
    "https://tapeplayers.com/products/canon-hi8-camcorder-tape-player-w-new-battery-usb-digitizing-software";

const SAMPLE_TITLE: &str =
    "Canon Hi8 Camcorder 8mm Tape Player w/ new battery, USB, digitizing software";

const SAMPLE_CONTENT: &str = "\
Canon Hi8 Camcorder 8mm Tape Player w/ new battery, USB, digitizing software
Regular price $249.00
Qualifies for free shipping
Free returns for 30 days
1 year warranty
Play and digitize 8mm, Hi8 tapes
Shoot authentic vintage videos on tape
Safely preserve your tapes at home
Includes battery, blank tape, charger
Guaranteed 100% working, free returns
This bundle includes a fully tested and working 8mm camcorder, and all of the necessary components to playback your 8mm, Hi8 tapes on any TV or PC. You can also digitize your 8mm tapes over USB using any computer and preserve or share your memories.
Includes battery and blank tape, so you're ready to start shooting vintage style videos that have a warm fuzzy look and feel.
This product is backed by our 365 day guarantee. Your product is eligible for a replacement or refund within 365 days of receipt if it does not work as expected.
What's in the Box
8mm/Hi8 camcorder
Battery
AC adapter, charger
AV RCA cable
AV to USB Adapter
Blank tape
Digitizing software
";

/// The raw submission: audited attributes plus the listing text.
pub fn tapeplayers_submission() -> PageSubmission {
    PageSubmission {
        profile: PageProfile {
            url: Some(SAMPLE_URL.to_string()),
            title: Some(SAMPLE_TITLE.to_string()),
            current_price: Some(249.0),
            image_count: Some(4),
            cta_count: Some(1),
            load_time_seconds: Some(2.5),
            mobile_optimized: Some(true),
            benefits: Some(
                [
                    "Play and digitize 8mm, Hi8 tapes",
                    "Shoot authentic vintage videos on tape",
                    "Safely preserve your tapes at home",
                    "Includes battery, blank tape, charger",
                    "Guaranteed 100% working, free returns",
                ]
                .into_iter()
                .map(str::to_string)
                .collect(),
            ),
            ..PageProfile::default()
        },
        content: Some(SAMPLE_CONTENT.to_string()),
    }
}

pub fn tapeplayers_page() -> PageProfile {
    tapeplayers_submission().into_profile()
}
