//! Device and radio configuration enumerations shared by several messages.
use super::proto_enum;

proto_enum! {
    HardwareModel {
        Unset = 0 => "UNSET",
        TloraV2 = 1 => "TLORA_V2",
        TloraV1 = 2 => "TLORA_V1",
        TloraV211p6 = 3 => "TLORA_V2_1_1P6",
        Tbeam = 4 => "TBEAM",
        HeltecV20 = 5 => "HELTEC_V2_0",
        TbeamV0p7 = 6 => "TBEAM_V0P7",
        TEcho = 7 => "T_ECHO",
        TloraV11p3 = 8 => "TLORA_V1_1P3",
        Rak4631 = 9 => "RAK4631",
        HeltecV21 = 10 => "HELTEC_V2_1",
        HeltecV1 = 11 => "HELTEC_V1",
        LilygoTbeamS3Core = 12 => "LILYGO_TBEAM_S3_CORE",
        Rak11200 = 13 => "RAK11200",
        NanoG1 = 14 => "NANO_G1",
        TloraV211p8 = 15 => "TLORA_V2_1_1P8",
        TloraT3S3 = 16 => "TLORA_T3_S3",
        NanoG1Explorer = 17 => "NANO_G1_EXPLORER",
        NanoG2Ultra = 18 => "NANO_G2_ULTRA",
        LoraType = 19 => "LORA_TYPE",
        Wiphone = 20 => "WIPHONE",
        WioWm1110 = 21 => "WIO_WM1110",
        Rak2560 = 22 => "RAK2560",
        HeltecHru3601 = 23 => "HELTEC_HRU_3601",
        HeltecWirelessBridge = 24 => "HELTEC_WIRELESS_BRIDGE",
        StationG1 = 25 => "STATION_G1",
        Rak11310 = 26 => "RAK11310",
        SenseloraRp2040 = 27 => "SENSELORA_RP2040",
        SenseloraS3 = 28 => "SENSELORA_S3",
        Canaryone = 29 => "CANARYONE",
        Rp2040Lora = 30 => "RP2040_LORA",
        StationG2 = 31 => "STATION_G2",
        LoraRelayV1 = 32 => "LORA_RELAY_V1",
        Nrf52840dk = 33 => "NRF52840DK",
        Ppr = 34 => "PPR",
        Genieblocks = 35 => "GENIEBLOCKS",
        Nrf52Unknown = 36 => "NRF52_UNKNOWN",
        Portduino = 37 => "PORTDUINO",
        AndroidSim = 38 => "ANDROID_SIM",
        DiyV1 = 39 => "DIY_V1",
        Nrf52840Pca10059 = 40 => "NRF52840_PCA10059",
        DrDev = 41 => "DR_DEV",
        M5stack = 42 => "M5STACK",
        HeltecV3 = 43 => "HELTEC_V3",
        HeltecWslV3 = 44 => "HELTEC_WSL_V3",
        Betafpv2400Tx = 45 => "BETAFPV_2400_TX",
        Betafpv900NanoTx = 46 => "BETAFPV_900_NANO_TX",
        RpiPico = 47 => "RPI_PICO",
        HeltecWirelessTracker = 48 => "HELTEC_WIRELESS_TRACKER",
        HeltecWirelessPaper = 49 => "HELTEC_WIRELESS_PAPER",
        TDeck = 50 => "T_DECK",
        TWatchS3 = 51 => "T_WATCH_S3",
        PicomputerS3 = 52 => "PICOMPUTER_S3",
        HeltecHt62 = 53 => "HELTEC_HT62",
        EbyteEsp32S3 = 54 => "EBYTE_ESP32_S3",
        Esp32S3Pico = 55 => "ESP32_S3_PICO",
        Chatter2 = 56 => "CHATTER_2",
        HeltecWirelessPaperV10 = 57 => "HELTEC_WIRELESS_PAPER_V1_0",
        HeltecWirelessTrackerV10 = 58 => "HELTEC_WIRELESS_TRACKER_V1_0",
        Unphone = 59 => "UNPHONE",
        TdLorac = 60 => "TD_LORAC",
        CdebyteEoraS3 = 61 => "CDEBYTE_EORA_S3",
        TwcMeshV4 = 62 => "TWC_MESH_V4",
        Nrf52PromicroDiy = 63 => "NRF52_PROMICRO_DIY",
        Radiomaster900BanditNano = 64 => "RADIOMASTER_900_BANDIT_NANO",
        HeltecCapsuleSensorV3 = 65 => "HELTEC_CAPSULE_SENSOR_V3",
        HeltecVisionMasterT190 = 66 => "HELTEC_VISION_MASTER_T190",
        HeltecVisionMasterE213 = 67 => "HELTEC_VISION_MASTER_E213",
        HeltecVisionMasterE290 = 68 => "HELTEC_VISION_MASTER_E290",
        HeltecMeshNodeT114 = 69 => "HELTEC_MESH_NODE_T114",
        SensecapIndicator = 70 => "SENSECAP_INDICATOR",
        TrackerT1000E = 71 => "TRACKER_T1000_E",
        Rak3172 = 72 => "RAK3172",
        WioE5 = 73 => "WIO_E5",
        Radiomaster900Bandit = 74 => "RADIOMASTER_900_BANDIT",
        Me25ls014y10td = 75 => "ME25LS01_4Y10TD",
        Rp2040FeatherRfm95 = 76 => "RP2040_FEATHER_RFM95",
        M5stackCorebasic = 77 => "M5STACK_COREBASIC",
        M5stackCore2 = 78 => "M5STACK_CORE2",
        RpiPico2 = 79 => "RPI_PICO2",
        M5stackCores3 = 80 => "M5STACK_CORES3",
        SeeedXiaoS3 = 81 => "SEEED_XIAO_S3",
        PrivateHw = 255 => "PRIVATE_HW",
    }
}

proto_enum! {
    /// Device role advertised in presence reports.
    Role {
        Client = 0 => "CLIENT",
        ClientMute = 1 => "CLIENT_MUTE",
        Router = 2 => "ROUTER",
        RouterClient = 3 => "ROUTER_CLIENT",
        Repeater = 4 => "REPEATER",
        Tracker = 5 => "TRACKER",
        Sensor = 6 => "SENSOR",
        Tak = 7 => "TAK",
        ClientHidden = 8 => "CLIENT_HIDDEN",
        LostAndFound = 9 => "LOST_AND_FOUND",
        TakTracker = 10 => "TAK_TRACKER",
        RouterLate = 11 => "ROUTER_LATE",
    }
}

proto_enum! {
    /// LoRa regulatory region.
    RegionCode {
        Unset = 0 => "UNSET",
        Us = 1 => "US",
        Eu433 = 2 => "EU_433",
        Eu868 = 3 => "EU_868",
        Cn = 4 => "CN",
        Jp = 5 => "JP",
        Anz = 6 => "ANZ",
        Kr = 7 => "KR",
        Tw = 8 => "TW",
        Ru = 9 => "RU",
        In = 10 => "IN",
        Nz865 = 11 => "NZ_865",
        Th = 12 => "TH",
        Lora24 = 13 => "LORA_24",
        Ua433 = 14 => "UA_433",
        Ua868 = 15 => "UA_868",
        My433 = 16 => "MY_433",
        My919 = 17 => "MY_919",
        Sg923 = 18 => "SG_923",
        Ph433 = 19 => "PH_433",
        Ph868 = 20 => "PH_868",
        Ph915 = 21 => "PH_915",
        Anz433 = 22 => "ANZ_433",
        Kz433 = 23 => "KZ_433",
        Kz863 = 24 => "KZ_863",
        Np865 = 25 => "NP_865",
        Br902 = 26 => "BR_902",
    }
}

proto_enum! {
    ModemPreset {
        LongFast = 0 => "LONG_FAST",
        LongSlow = 1 => "LONG_SLOW",
        VeryLongSlow = 2 => "VERY_LONG_SLOW",
        MediumSlow = 3 => "MEDIUM_SLOW",
        MediumFast = 4 => "MEDIUM_FAST",
        ShortSlow = 5 => "SHORT_SLOW",
        ShortFast = 6 => "SHORT_FAST",
        LongModerate = 7 => "LONG_MODERATE",
        ShortTurbo = 8 => "SHORT_TURBO",
    }
}
