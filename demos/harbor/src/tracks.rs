//! Embedded feed for five vessels in the inner Oslofjord.
//!
//! Rows are deliberately unsorted and vessel 3 reports one position twice,
//! the way a real AIS relay delivers them.

pub const POSITIONS_CSV: &str = "\
time,asset_id,lat,lon\n\
0,1,59.9040,10.7250\n\
60,1,59.9025,10.7310\n\
120,1,59.9010,10.7380\n\
180,1,59.8990,10.7440\n\
0,2,59.9060,10.7330\n\
90,2,59.9030,10.7350\n\
180,2,59.8995,10.7365\n\
60,3,59.9050,10.7420\n\
0,3,59.9072,10.7400\n\
90,3,59.9050,10.7420\n\
150,3,59.9020,10.7440\n\
240,3,59.8985,10.7470\n\
0,4,59.9000,10.7200\n\
120,4,59.9015,10.7300\n\
240,4,59.9030,10.7400\n\
0,5,59.8970,10.7500\n\
100,5,59.8995,10.7450\n\
200,5,59.9025,10.7420\n\
";

pub const HEADINGS_CSV: &str = "\
time,asset_id,heading\n\
0,1,118.0\n\
0,2,164.0\n\
0,3,150.5\n\
0,4,72.0\n\
0,5,-35.0\n\
";
