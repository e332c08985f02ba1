use crate::Scalar;
use crate::Table;
use crate::TableValue;
use crate::Tables;

pub const MAPS_JSON: &str = include_str!("../tests/fixtures/maps.json");

pub fn fixture_tables() -> Tables {
	Tables::from_json(MAPS_JSON).unwrap_or_else(|e| panic!("fixture maps.json is invalid: {e}"))
}

pub fn sequence(items: &[&str]) -> TableValue {
	TableValue::Sequence(items.iter().map(|item| Scalar::from(*item)).collect())
}

pub fn scalar_table() -> Table {
	[("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect()
}

pub fn mixed_table() -> Table {
	Table::from_iter([
		("X", sequence(&["-left", "-right"])),
		("T", TableValue::from("-top")),
		("Y", sequence(&["-top", "-bottom", "-middle"])),
	])
}

pub const BASIC_INPUT: &str = r"
    .u-display {
      @each-in-map $display-name, $display-type in display_types {
        &$(display-name) {
          display: $display-type;
        }
      }
    }
    ";

pub const BASIC_OUTPUT: &str = r"
    .u-display {
      @each $display-name, $display-type in (None, InlineBlock, InlineFlex, Block, Flex, Grid), (none, inline-block, inline-flex, block, flex, grid) {
        &$(display-name) {
          display: $display-type;
        }
      }
    }
    ";

pub const MULTI_VALUE_INPUT: &str = r"@each $space, $space-index in 0, 5px, 10px, 15px, 30px, 45px, 60px {
  @each-in-map $direction, $direction-attribute in direction_map {
    $(direction)$(space-index) {
      $(direction-attribute): $space !important;
    }
  }
}";

pub const MULTI_VALUE_OUTPUT: &str = r"@each $space, $space-index in 0, 5px, 10px, 15px, 30px, 45px, 60px {
  @each $direction, $direction-attribute in (X, X, Y, Y, A, T, B, L, R), (-left, -right, -top, -bottom, , -top, -bottom, -left, -right) {
    $(direction)$(space-index) {
      $(direction-attribute): $space !important;
    }
  }
}";

pub const DESTRUCTURING_INPUT: &str = r"@each-in-map $class, $background, $label_width in graph_parts {
  $(class) {
    .metrics-graph-part-number:before {
      background: $background;
    }

    .metrics-graph-part-number,
    .metrics-graph-part-label {
      width: $label_width;
    }
  }
}";

pub const DESTRUCTURING_OUTPUT: &str = r"@each $class, $background, $label_width in (opt-outs, clicks, opens, bounces, unactioned), ($mango_tango, var(--color-a11y-blue), $funk, $agrellan_badland, $hint_of_mauve_pansy), (52px, 36px, 35px, 49px, auto) {
  $(class) {
    .metrics-graph-part-number:before {
      background: $background;
    }

    .metrics-graph-part-number,
    .metrics-graph-part-label {
      width: $label_width;
    }
  }
}";
