/*!
# IO

Reading station/route datasets from JSON.

A dataset consists of two record lists:
- **stations** `{id, name, x, y}` with ids starting at `1`,
- **routes** `{name, color, stations}` where `stations` lists consecutive stops by node id
  (i.e. already starting at `0`).

They can be read either from a single document `{"stations": [..], "routes": [..]}`
(see [`MetroDataset::from_reader`] and [`MetroDataset::from_json_str`]) or from two files holding
one array each (see [`MetroDataset::from_files`]). Use [`metro_graph`](crate::gens::metro_graph)
to turn a dataset into a [`Graph`](crate::Graph).
*/

mod metro;

pub use metro::*;
