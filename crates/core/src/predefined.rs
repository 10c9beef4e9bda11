//! Hand-authored customizations shown before a user saves their own.
//!
//! Used as the starting point of a first-time customization, as show-off
//! characters on login and join screens, and for the random sample endpoint.

use rand::seq::IndexedRandom;

use crate::customization::{CharPart, Customization};
use crate::types::OptionId;

/// A named, fixed customization.
#[derive(Debug, Clone, Copy)]
pub struct Predefined {
    pub name: &'static str,
    parts: &'static [(OptionId, Option<&'static str>)],
}

impl Predefined {
    pub fn customization(&self) -> Customization {
        self.parts
            .iter()
            .map(|&(option_id, color)| CharPart {
                option_id,
                color: color.map(str::to_string),
            })
            .collect()
    }
}

macro_rules! predefined {
    (@color $color:literal) => { Some($color) };
    (@color) => { None };
    ($name:literal: $(($id:literal $(, $color:literal)?)),+ $(,)?) => {
        Predefined {
            name: $name,
            parts: &[$(($id, predefined!(@color $($color)?))),+],
        }
    };
}

#[rustfmt::skip]
pub const PREDEFINED: &[Predefined] = &[
    predefined!("alien": (1000, "#0080FF"), (2016, "#FF0000"), (3005, "#0000FF"), (4004), (5010, "#FF0000")),
    predefined!("mexican": (1000, "#D99958"), (2014, "#000000"), (3004, "#515158"), (4001), (7007)),
    predefined!("yankee": (1000, "#D99958"), (2006, "#579EC9"), (3004, "#605240"), (4007), (7001, "#4AD031")),
    predefined!("sick_woman": (1000, "#DDDD22"), (2004, "#663333"), (3007, "#515158"), (4008), (7005, "#FFA2BF")),
    predefined!("fart_bender": (1000, "#D99958"), (2013, "#000000"), (3003, "#515158"), (4001), (5012, "#00FFFF")),
    predefined!("ottoman_1": (1000, "#D99958"), (2006, "#000000"), (3003, "#605240"), (4002), (7012, "#EF2D35")),
    predefined!("asian": (1000, "#D99958"), (2000), (3001, "#333333"), (4003), (7003)),
    predefined!("sun_burn": (1000, "#AA4E31"), (2009, "#FF0000"), (3006, "#FF0000"), (4000), (7013, "#FFFFFF")),
    predefined!("cartman": (1000, "#D99958"), (2012), (3003, "#515158"), (4009), (7006)),
    predefined!("takke": (1000, "#D99958"), (2002, "#57C957"), (3004, "#605240"), (4001), (7008)),
    predefined!("emo": (1000, "#D99958"), (2002, "#000000"), (3000, "#515158"), (4004), (5011, "#515158")),
    predefined!("zombie": (1000, "#D99958"), (2020), (3002, "#515158"), (4000)),
    predefined!("smurf": (1000, "#0080FF"), (2012), (3007, "#515158"), (4005), (5004, "#333333"), (7015, "#3A3A3A")),
    predefined!("meth_head": (1000, "#DDDD22"), (2017, "#579EC9"), (3007, "#857051"), (4011), (5005, "#515158")),
    predefined!("stewie": (1000, "#D99958"), (2009, "#000000"), (3000, "#515158"), (4009), (5002, "#515158")),
    predefined!("ottoman_2": (1000, "#D99958"), (2002, "#663333"), (3004, "#333333"), (4012), (7003)),
    predefined!("random01": (1000, "#D99958"), (2005, "#FF0000"), (3008, "#FFFFFF"), (4003), (5001, "#FFFFFF")),
    predefined!("random02": (1000, "#706250"), (2015), (3006, "#0000FF"), (4010), (7004, "#B12592")),
    predefined!("random03": (1000, "#C0C0C0"), (2015), (3005, "#00FFFF"), (4000), (5006, "#FF0000"), (7011, "#4AD031")),
    predefined!("random04": (1000, "#C0C0C0"), (2019), (3002, "#DDDD22"), (4004), (5006, "#FF0000"), (7011, "#00A2C2")),
    predefined!("random05": (1000, "#27160E"), (2007, "#FF0000"), (3007, "#333333"), (4000)),
    predefined!("random06": (1000, "#A27D47"), (2004, "#57C957"), (3008, "#FF0000"), (4000), (7009)),
    predefined!("random07": (1000, "#AA4E31"), (2004, "#57C957"), (3002, "#DDDD22"), (4000), (5011, "#00FF00"), (7005, "#EF2D35")),
    predefined!("random08": (1000, "#DDDD22"), (2016, "#000000"), (3008, "#FF0000"), (4000), (5008, "#FF0000")),
];

/// All predefined customizations.
pub fn all() -> impl Iterator<Item = Customization> {
    PREDEFINED.iter().map(Predefined::customization)
}

/// Pick one predefined customization uniformly at random.
pub fn random_customization() -> Customization {
    PREDEFINED
        .choose(&mut rand::rng())
        .map(Predefined::customization)
        .unwrap_or_default()
}
