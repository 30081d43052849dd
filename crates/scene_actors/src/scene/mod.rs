mod catalog;
mod graph;
mod props;
mod transform;

pub use catalog::{
    ActorCatalog, CatalogError, CatalogErrorCode, SourceLocation, StaticActorCatalog,
};
pub use graph::{ObjectId, ObjectKind, SceneGraph, SceneLoadError, SceneObject};
pub use props::{
    ActorProperty, EntranceProperty, HeaderSettings, PropValue, RoomHeader, SceneSetupPreset,
    TransitionActorProperty, ACTOR_ID_CUSTOM, ACTOR_ID_NONE, CUSTOM_PROP_VALUE,
};
pub use transform::{
    radians_to_binang, AxisConvertingResolver, ConvertedTransform, RootTransform,
    TransformResolver, BINANG_HALF_TURN,
};
