use crate::context::{ExportContext, ExportSettings};
use crate::scene::{
    ActorProperty, AxisConvertingResolver, EntranceProperty, ObjectId, ObjectKind, RoomHeader,
    RootTransform, SceneGraph, SceneObject, StaticActorCatalog, TransitionActorProperty,
};

pub(crate) struct Fixture {
    pub graph: SceneGraph,
    pub scene: ObjectId,
    pub catalog: StaticActorCatalog,
    pub settings: ExportSettings,
}

impl Fixture {
    pub fn new() -> Self {
        let mut graph = SceneGraph::new();
        let scene = graph.add(SceneObject::new("spot00", None, ObjectKind::Scene));
        let catalog = StaticActorCatalog::new()
            .with_actor("ACTOR_PLAYER", "Player")
            .with_actor("ACTOR_EN_DOOR", "Wooden Door - EN_DOOR")
            .with_actor("ACTOR_EN_HOLL", "Room Loader - EN_HOLL");
        Self {
            graph,
            scene,
            catalog,
            settings: ExportSettings {
                use_new_actor_panel: true,
                root_transform: RootTransform { scale: 1.0 },
            },
        }
    }

    pub fn add_room(&mut self, name: &str, room_index: u32) -> ObjectId {
        self.graph.add(SceneObject::new(
            name,
            Some(self.scene),
            ObjectKind::Room(RoomHeader { room_index }),
        ))
    }

    pub fn add_transition(
        &mut self,
        name: &str,
        parent: ObjectId,
        prop: TransitionActorProperty,
    ) -> ObjectId {
        self.graph.add(
            SceneObject::new(name, Some(parent), ObjectKind::TransitionActor(prop))
                .with_location([10.0, -20.0, 5.0]),
        )
    }

    pub fn add_entrance(
        &mut self,
        name: &str,
        parent: ObjectId,
        prop: EntranceProperty,
    ) -> ObjectId {
        self.graph.add(SceneObject::new(
            name,
            Some(parent),
            ObjectKind::Entrance(prop),
        ))
    }

    pub fn ctx(&self, header_index: u32) -> ExportContext<'_> {
        ExportContext {
            graph: &self.graph,
            scene: self.scene,
            header_index,
            settings: self.settings,
            catalog: &self.catalog,
            resolver: &AxisConvertingResolver,
        }
    }
}

pub(crate) fn actor(actor_id: &str) -> ActorProperty {
    ActorProperty {
        actor_id: actor_id.to_string(),
        params: "0x0000".to_string(),
        params_custom: "0xFFFF".to_string(),
        ..ActorProperty::default()
    }
}

pub(crate) fn transition(actor_id: &str) -> TransitionActorProperty {
    TransitionActorProperty {
        actor: actor(actor_id),
        ..TransitionActorProperty::default()
    }
}

pub(crate) fn entrance(spawn_index: u32, tied_room: Option<ObjectId>) -> EntranceProperty {
    EntranceProperty {
        actor: actor("ACTOR_PLAYER"),
        custom_actor: false,
        tied_room,
        spawn_index,
    }
}
